//! The hospital record entity and its wire contract.
//!
//! Records arrive from the backend as camelCase JSON. The
//! `professionSalaries` field is historically messy (see [`crate::salaries`])
//! and is decoded leniently: anything unparsable degrades to absent rather
//! than rejecting the record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One internship-granting institution.
///
/// `id` is an opaque stable string assigned by the backend; it is the join
/// key with the applied and favourites sets and never changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalRecord {
    pub id: String,
    pub name: String,
    /// Administrative region; exact-match categorical (see [`crate::states`]).
    pub state: String,
    /// Conceptually a set; order is preserved for display.
    #[serde(default)]
    pub professions: Vec<String>,
    /// Free-text label, also used as a categorical filter value.
    #[serde(default)]
    pub salary_range: String,
    pub deadline: String,
    #[serde(default)]
    pub created: String,
    pub online_application: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_address: Option<String>,
    /// Per-profession salary labels; partial coverage of `professions` is
    /// allowed, absent entries mean "unspecified".
    #[serde(
        default,
        deserialize_with = "crate::salaries::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub profession_salaries: Option<BTreeMap<String, String>>,
}

impl HospitalRecord {
    /// The professions rendered as display text, e.g. `"Nurse, Doctor"`.
    ///
    /// Free-text search matches against this rendering.
    pub fn professions_text(&self) -> String {
        self.professions.join(", ")
    }

    /// Salary label for a single profession, if specified.
    pub fn salary_for(&self, profession: &str) -> Option<&str> {
        self.profession_salaries
            .as_ref()?
            .get(profession)
            .map(String::as_str)
    }

    /// Derive the primary call-to-action for this record.
    ///
    /// The `online_application` flag is authoritative for which action is
    /// offered; a blank or missing field only downgrades the action to
    /// disabled (`None` inside the variant).
    pub fn apply_action(&self) -> ApplyAction {
        if self.online_application {
            ApplyAction::Online {
                url: non_blank(self.application_url.as_deref()),
            }
        } else {
            ApplyAction::InPerson {
                address: non_blank(self.physical_address.as_deref()),
            }
        }
    }
}

/// The primary call-to-action derived from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyAction {
    /// Apply through the hospital's web form; `None` when no usable URL
    /// is on file (action shown but disabled).
    Online { url: Option<String> },
    /// Apply by courier or in person; `None` when no usable address is on
    /// file (action shown but disabled).
    InPerson { address: Option<String> },
}

impl ApplyAction {
    /// Whether the action can actually be taken.
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Online { url } => url.is_some(),
            Self::InPerson { address } => address.is_some(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
