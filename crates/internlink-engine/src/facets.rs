//! Distinct-value queries that populate filter-chip UIs.
//!
//! Always recomputed from the canonical collection — never cached — so a
//! refresh is immediately reflected. Blank tokens are filtered out: a
//! record with an empty professions list or a blank entry must not produce
//! an empty chip.

use std::collections::BTreeSet;

use internlink_model::HospitalRecord;

/// Distinct professions across the collection, trimmed, ascending.
pub fn available_professions(records: &[HospitalRecord]) -> Vec<String> {
    distinct(
        records
            .iter()
            .flat_map(|h| h.professions.iter().map(String::as_str)),
    )
}

/// Distinct states across the collection, ascending.
pub fn available_states(records: &[HospitalRecord]) -> Vec<String> {
    distinct(records.iter().map(|h| h.state.as_str()))
}

/// Distinct salary-range labels across the collection, ascending.
pub fn available_salary_ranges(records: &[HospitalRecord]) -> Vec<String> {
    distinct(records.iter().map(|h| h.salary_range.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let set: BTreeSet<String> = values
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hospital(id: &str, state: &str, professions: &[&str], salary: &str) -> HospitalRecord {
        HospitalRecord {
            id: id.to_string(),
            name: format!("Hospital {id}"),
            state: state.to_string(),
            professions: professions.iter().map(|p| p.to_string()).collect(),
            salary_range: salary.to_string(),
            deadline: "2026-09-30".to_string(),
            created: String::new(),
            online_application: false,
            application_url: None,
            physical_address: Some("12 Hospital Rd".to_string()),
            profession_salaries: None,
        }
    }

    #[test]
    fn professions_are_deduped_trimmed_and_sorted() {
        // Same set entered with differing whitespace and order.
        let records = vec![
            hospital("a", "Lagos", &["Nurse", " Doctor"], "₦50k"),
            hospital("b", "Kano", &["Doctor", "Nurse "], "₦60k"),
        ];
        assert_eq!(available_professions(&records), ["Doctor", "Nurse"]);
    }

    #[test]
    fn blank_professions_do_not_produce_empty_entries() {
        let records = vec![
            hospital("a", "Lagos", &["", "  "], "₦50k"),
            hospital("b", "Kano", &[], "₦60k"),
            hospital("c", "Oyo", &["Radiographer"], "₦70k"),
        ];
        assert_eq!(available_professions(&records), ["Radiographer"]);
    }

    #[test]
    fn states_and_salary_ranges_are_distinct_and_sorted() {
        let records = vec![
            hospital("a", "Lagos", &["Nurse"], "₦50k - ₦80k"),
            hospital("b", "Kano", &["Nurse"], "₦50k - ₦80k"),
            hospital("c", "Lagos", &["Nurse"], "₦90k+"),
        ];
        assert_eq!(available_states(&records), ["Kano", "Lagos"]);
        assert_eq!(available_salary_ranges(&records), ["₦50k - ₦80k", "₦90k+"]);
    }

    #[test]
    fn empty_collection_yields_empty_facets() {
        assert!(available_professions(&[]).is_empty());
        assert!(available_states(&[]).is_empty());
        assert!(available_salary_ranges(&[]).is_empty());
    }
}
