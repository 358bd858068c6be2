//! Cached record shapes and conversions to/from the data model.
//!
//! `CachedHospital` keeps the storage shape the backend's own table uses:
//! professions comma-joined, the salary mapping as its encoded text. The
//! conversions here are the only place that shape meets the structured
//! model.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use internlink_model::{HospitalRecord, salaries};
use serde::{Deserialize, Serialize};

/// One hospital record in storage form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedHospital {
    pub id: String,
    pub name: String,
    pub state: String,
    /// Comma-separated profession names.
    pub professions: String,
    pub salary_range: String,
    pub deadline: String,
    pub created: String,
    pub online_application: bool,
    pub application_url: Option<String>,
    pub physical_address: Option<String>,
    /// Encoded via [`internlink_model::salaries`].
    pub profession_salaries: Option<String>,
}

impl CachedHospital {
    /// Convert a model record into storage form.
    pub fn from_record(record: &HospitalRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            state: record.state.clone(),
            professions: record.professions.join(","),
            salary_range: record.salary_range.clone(),
            deadline: record.deadline.clone(),
            created: record.created.clone(),
            online_application: record.online_application,
            application_url: record.application_url.clone(),
            physical_address: record.physical_address.clone(),
            profession_salaries: record.profession_salaries.as_ref().map(salaries::encode),
        }
    }

    /// Convert storage form back into a model record.
    ///
    /// Blank profession tokens are dropped and an unparsable salary text
    /// degrades to absent, per the engine's defensive-data rules.
    pub fn into_record(self) -> HospitalRecord {
        HospitalRecord {
            professions: self
                .professions
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            profession_salaries: self
                .profession_salaries
                .as_deref()
                .and_then(salaries::decode),
            id: self.id,
            name: self.name,
            state: self.state,
            salary_range: self.salary_range,
            deadline: self.deadline,
            created: self.created,
            online_application: self.online_application,
            application_url: self.application_url,
            physical_address: self.physical_address,
        }
    }
}

/// Root payload of the cache file.
///
/// `applied` is its own section, independent of the record list:
/// replacing the records never touches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// Schema version (for future migrations).
    pub schema_version: u32,
    /// When the cache was last written, RFC 3339.
    pub saved_at: String,
    /// Mirrored server records.
    pub hospitals: Vec<CachedHospital>,
    /// Ids of hospitals the user has applied to.
    pub applied: BTreeSet<String>,
}

impl CacheFile {
    /// Create an empty cache payload.
    pub fn new() -> Self {
        Self {
            schema_version: crate::io::CURRENT_SCHEMA_VERSION,
            saved_at: Utc::now().to_rfc3339(),
            hospitals: Vec::new(),
            applied: BTreeSet::new(),
        }
    }

    /// Update the saved-at timestamp.
    pub fn touch(&mut self) {
        self.saved_at = Utc::now().to_rfc3339();
    }

    /// Parse the saved-at timestamp.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.saved_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self::new()
    }
}
