//! Filter selection and the filtered-view recomputation.
//!
//! `apply_filters` is a pure function of (records, selection, favourites)
//! and is the single place list narrowing happens. Dimensions apply in a
//! fixed order and compose conjunctively; there is no OR mode and no way
//! to invert a filter.

use std::collections::BTreeSet;

use internlink_model::HospitalRecord;
use serde::Serialize;

/// The session-scoped filter tuple.
///
/// Empty string on a categorical field means "no filter on that
/// dimension". This tuple, the canonical collection, and the favourites
/// set fully determine the filtered view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub search_query: String,
    pub profession: String,
    pub state: String,
    pub salary_range: String,
    pub favourites_only: bool,
}

impl FilterSelection {
    /// Whether any dimension narrows the view.
    pub fn is_any_active(&self) -> bool {
        !self.search_query.is_empty()
            || !self.profession.is_empty()
            || !self.state.is_empty()
            || !self.salary_range.is_empty()
            || self.favourites_only
    }
}

/// Derive the filtered view from the canonical collection.
///
/// Order is preserved (fetch/cache order; the engine imposes no sorting).
/// Steps, each narrowing the previous result:
///
/// 1. case-insensitive substring search over name, state, and the joined
///    professions text,
/// 2. exact profession membership (post-trim),
/// 3. exact state equality,
/// 4. salary-range substring containment (the filter values are drawn from
///    the same free text, so containment is the intended semantics),
/// 5. favourites membership.
pub fn apply_filters(
    records: &[HospitalRecord],
    selection: &FilterSelection,
    favourites: &BTreeSet<String>,
) -> Vec<HospitalRecord> {
    let query = selection.search_query.to_lowercase();
    records
        .iter()
        .filter(|hospital| {
            if !query.is_empty() {
                let matched = hospital.name.to_lowercase().contains(&query)
                    || hospital.state.to_lowercase().contains(&query)
                    || hospital.professions_text().to_lowercase().contains(&query);
                if !matched {
                    return false;
                }
            }
            if !selection.profession.is_empty()
                && !hospital
                    .professions
                    .iter()
                    .any(|p| p.trim() == selection.profession)
            {
                return false;
            }
            if !selection.state.is_empty() && hospital.state != selection.state {
                return false;
            }
            if !selection.salary_range.is_empty()
                && !hospital.salary_range.contains(&selection.salary_range)
            {
                return false;
            }
            if selection.favourites_only && !favourites.contains(&hospital.id) {
                return false;
            }
            true
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hospital(id: &str, name: &str, state: &str, professions: &[&str]) -> HospitalRecord {
        HospitalRecord {
            id: id.to_string(),
            name: name.to_string(),
            state: state.to_string(),
            professions: professions.iter().map(|p| p.to_string()).collect(),
            salary_range: "₦50,000 - ₦80,000".to_string(),
            deadline: "2026-09-30".to_string(),
            created: String::new(),
            online_application: true,
            application_url: None,
            physical_address: None,
            profession_salaries: None,
        }
    }

    fn lagos_kano_fixture() -> Vec<HospitalRecord> {
        vec![
            hospital("a", "Gbagada General", "Lagos", &["Nurse"]),
            hospital("b", "Ikorodu General", "Lagos", &["Doctor"]),
            hospital("c", "Aminu Kano Teaching", "Kano", &["Doctor"]),
        ]
    }

    #[test]
    fn no_active_filters_passes_everything_through_in_order() {
        let records = lagos_kano_fixture();
        let filtered = apply_filters(&records, &FilterSelection::default(), &BTreeSet::new());
        assert_eq!(filtered, records);
    }

    #[test]
    fn state_filter_keeps_original_order() {
        let records = lagos_kano_fixture();
        let selection = FilterSelection {
            state: "Lagos".to_string(),
            ..FilterSelection::default()
        };
        let filtered = apply_filters(&records, &selection, &BTreeSet::new());
        let ids: Vec<&str> = filtered.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn search_composes_conjunctively_with_state() {
        // "Kano" matches nothing inside the Lagos subset.
        let records = lagos_kano_fixture();
        let selection = FilterSelection {
            state: "Lagos".to_string(),
            search_query: "Kano".to_string(),
            ..FilterSelection::default()
        };
        assert!(apply_filters(&records, &selection, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_name_state_and_professions() {
        let records = lagos_kano_fixture();
        let by_name = FilterSelection {
            search_query: "gbagada".to_string(),
            ..FilterSelection::default()
        };
        assert_eq!(apply_filters(&records, &by_name, &BTreeSet::new()).len(), 1);

        let by_state = FilterSelection {
            search_query: "KANO".to_string(),
            ..FilterSelection::default()
        };
        // Matches the Kano record by state and by name.
        assert_eq!(apply_filters(&records, &by_state, &BTreeSet::new()).len(), 1);

        let by_profession = FilterSelection {
            search_query: "doctor".to_string(),
            ..FilterSelection::default()
        };
        assert_eq!(
            apply_filters(&records, &by_profession, &BTreeSet::new()).len(),
            2
        );
    }

    #[test]
    fn profession_filter_matches_post_trim() {
        let records = vec![hospital("a", "St. Mary", "Enugu", &[" Nurse ", "Doctor"])];
        let selection = FilterSelection {
            profession: "Nurse".to_string(),
            ..FilterSelection::default()
        };
        assert_eq!(apply_filters(&records, &selection, &BTreeSet::new()).len(), 1);
    }

    #[test]
    fn salary_filter_is_substring_containment() {
        let records = lagos_kano_fixture();
        let selection = FilterSelection {
            salary_range: "₦50,000".to_string(),
            ..FilterSelection::default()
        };
        assert_eq!(apply_filters(&records, &selection, &BTreeSet::new()).len(), 3);

        let miss = FilterSelection {
            salary_range: "₦500,000".to_string(),
            ..FilterSelection::default()
        };
        assert!(apply_filters(&records, &miss, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn favourites_only_yields_the_favourite_subset_in_order() {
        let records = vec![
            hospital("a", "One", "Lagos", &["Nurse"]),
            hospital("b", "Two", "Lagos", &["Nurse"]),
            hospital("c", "Three", "Kano", &["Doctor"]),
            hospital("d", "Four", "Kano", &["Doctor"]),
        ];
        let favourites: BTreeSet<String> = ["a".to_string(), "c".to_string()].into();
        let selection = FilterSelection {
            favourites_only: true,
            ..FilterSelection::default()
        };
        let ids: Vec<String> = apply_filters(&records, &selection, &favourites)
            .into_iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(ids, ["a", "c"]);
    }

    // ------------------------------------------------------------------
    // Property tests: the filter laws
    // ------------------------------------------------------------------

    fn arb_records_with_favourites()
    -> impl Strategy<Value = (Vec<HospitalRecord>, BTreeSet<String>)> {
        let entry = (
            prop::sample::select(vec![
                "General Hospital",
                "Teaching Hospital",
                "Specialist Clinic",
            ]),
            prop::sample::select(vec!["Lagos", "Kano", "Oyo", "Rivers"]),
            prop::collection::vec(
                prop::sample::select(vec!["Nurse", "Doctor", "Pharmacist", "Lab Scientist"]),
                0..3,
            ),
            prop::sample::select(vec!["₦40,000 - ₦60,000", "₦60,000 - ₦90,000", "₦90,000+"]),
            any::<bool>(),
        );
        prop::collection::vec(entry, 0..12).prop_map(|entries| {
            let mut favourites = BTreeSet::new();
            let records = entries
                .into_iter()
                .enumerate()
                .map(|(i, (name, state, professions, salary, favourite))| {
                    let id = format!("h{i}");
                    if favourite {
                        favourites.insert(id.clone());
                    }
                    let mut record = hospital(&id, name, state, &[]);
                    record.professions = professions.into_iter().map(String::from).collect();
                    record.salary_range = salary.to_string();
                    record
                })
                .collect();
            (records, favourites)
        })
    }

    fn arb_selection() -> impl Strategy<Value = FilterSelection> {
        (
            prop::sample::select(vec!["", "hospital", "lagos", "Doctor", "zz"]),
            prop::sample::select(vec!["", "Nurse", "Doctor"]),
            prop::sample::select(vec!["", "Lagos", "Kano"]),
            prop::sample::select(vec!["", "₦60", "₦90,000+"]),
            any::<bool>(),
        )
            .prop_map(
                |(search, profession, state, salary, favourites_only)| FilterSelection {
                    search_query: search.to_string(),
                    profession: profession.to_string(),
                    state: state.to_string(),
                    salary_range: salary.to_string(),
                    favourites_only,
                },
            )
    }

    proptest! {
        /// Same inputs, same output: order and contents.
        #[test]
        fn apply_filters_is_idempotent(
            (records, favourites) in arb_records_with_favourites(),
            selection in arb_selection(),
        ) {
            let first = apply_filters(&records, &selection, &favourites);
            let second = apply_filters(&records, &selection, &favourites);
            prop_assert_eq!(first, second);
        }

        /// The combined result equals the records every single-dimension
        /// filter retains, in original order.
        #[test]
        fn filter_dimensions_compose_conjunctively(
            (records, favourites) in arb_records_with_favourites(),
            selection in arb_selection(),
        ) {
            let combined = apply_filters(&records, &selection, &favourites);

            let singles = [
                FilterSelection { search_query: selection.search_query.clone(), ..FilterSelection::default() },
                FilterSelection { profession: selection.profession.clone(), ..FilterSelection::default() },
                FilterSelection { state: selection.state.clone(), ..FilterSelection::default() },
                FilterSelection { salary_range: selection.salary_range.clone(), ..FilterSelection::default() },
                FilterSelection { favourites_only: selection.favourites_only, ..FilterSelection::default() },
            ];

            let mut expected = records.clone();
            for single in singles {
                let kept: BTreeSet<String> = apply_filters(&records, &single, &favourites)
                    .into_iter()
                    .map(|h| h.id)
                    .collect();
                expected.retain(|h| kept.contains(&h.id));
            }

            prop_assert_eq!(combined, expected);
        }
    }
}
