use crate::domain::demand::types::HistoricalRideRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bijective mapping from location labels to integer codes `0..n`.
///
/// Codes are assigned in first-seen order over one dataset and are stable for
/// the lifetime of the model trained with them. They are NOT stable across
/// independently trained models, which is why the vocabulary travels inside
/// the model artifact instead of being re-derived at serving time.
///
/// Backed by a `BTreeMap` so serialization is key-ordered: two identical
/// mappings always produce identical artifact bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationVocabulary {
    codes: BTreeMap<String, u32>,
}

impl LocationVocabulary {
    /// Scans the dataset and assigns each distinct location label a code in
    /// first-seen order, starting at 0. Deterministic for a fixed record
    /// order.
    pub fn fit(records: &[HistoricalRideRecord]) -> Self {
        let mut codes = BTreeMap::new();
        for record in records {
            if !codes.contains_key(record.location.as_str()) {
                let next = codes.len() as u32;
                codes.insert(record.location.clone(), next);
            }
        }
        Self { codes }
    }

    /// Looks up the code for a label seen during fitting.
    pub fn code_for(&self, label: &str) -> Option<u32> {
        self.codes.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.codes.contains_key(label)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Labels in code order, mainly for diagnostics.
    pub fn labels_by_code(&self) -> Vec<&str> {
        let mut entries: Vec<(&str, u32)> = self
            .codes
            .iter()
            .map(|(label, code)| (label.as_str(), *code))
            .collect();
        entries.sort_by_key(|(_, code)| *code);
        entries.into_iter().map(|(label, _)| label).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(location: &str) -> HistoricalRideRecord {
        let at = NaiveDate::from_ymd_opt(2024, 5, 13)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        HistoricalRideRecord::new(at, location, 10.0)
    }

    #[test]
    fn test_fit_assigns_codes_in_first_seen_order() {
        let records = vec![record("B"), record("A"), record("B"), record("C")];
        let vocab = LocationVocabulary::fit(&records);

        assert_eq!(vocab.code_for("B"), Some(0));
        assert_eq!(vocab.code_for("A"), Some(1));
        assert_eq!(vocab.code_for("C"), Some(2));
        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn test_codes_form_a_bijection_over_0_to_n() {
        let records = vec![
            record("Airport"),
            record("Downtown"),
            record("Harbor"),
            record("Airport"),
        ];
        let vocab = LocationVocabulary::fit(&records);

        let mut seen: Vec<u32> = ["Airport", "Downtown", "Harbor"]
            .iter()
            .filter_map(|label| vocab.code_for(label))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn test_unknown_label_has_no_code() {
        let vocab = LocationVocabulary::fit(&[record("A")]);
        assert_eq!(vocab.code_for("Z"), None);
        assert!(!vocab.contains("Z"));
    }

    #[test]
    fn test_empty_dataset_yields_empty_vocabulary() {
        let vocab = LocationVocabulary::fit(&[]);
        assert!(vocab.is_empty());
    }

    #[test]
    fn test_labels_by_code_preserves_assignment_order() {
        let records = vec![record("Harbor"), record("Airport"), record("Downtown")];
        let vocab = LocationVocabulary::fit(&records);
        assert_eq!(vocab.labels_by_code(), vec!["Harbor", "Airport", "Downtown"]);
    }

    #[test]
    fn test_serde_roundtrip_keeps_codes() {
        let records = vec![record("B"), record("A")];
        let vocab = LocationVocabulary::fit(&records);

        let json = serde_json::to_string(&vocab).expect("serialize");
        let restored: LocationVocabulary = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(restored, vocab);
        assert_eq!(restored.code_for("B"), Some(0));
        assert_eq!(restored.code_for("A"), Some(1));
    }
}
