//! The immutable state snapshot published to consumers.

use std::collections::BTreeSet;

use internlink_model::HospitalRecord;
use serde::Serialize;

/// Everything a front end needs to render the listing screens.
///
/// Published after every mutation; treat as read-only. All mutation goes
/// back through `ListingEngine` intent methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListSnapshot {
    pub is_loading: bool,
    /// Dismissible user-facing message; `None` when the last operation
    /// (or an explicit dismiss) cleared it.
    pub error: Option<String>,
    /// The canonical collection, for callers needing unfiltered access.
    pub hospitals: Vec<HospitalRecord>,
    /// The post-filter view.
    pub filtered_hospitals: Vec<HospitalRecord>,
    /// Canonical collection narrowed to applied ids, in canonical order.
    pub applied_hospitals: Vec<HospitalRecord>,
    pub favourite_ids: BTreeSet<String>,
    pub show_favourites_only: bool,
    pub search_query: String,
    pub selected_profession: String,
    pub selected_state: String,
    pub selected_salary_range: String,
    pub is_logged_in: bool,
    pub is_admin: bool,
}

impl ListSnapshot {
    /// Whether an error message is pending display.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
