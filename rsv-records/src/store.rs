use crate::record::{MonthlyValues, YearlyRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// The parsed records of one source, in the order they appeared in its file.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct SourceDataset {
    pub source_id: String,
    pub records: Vec<YearlyRecord>,
}

impl SourceDataset {
    pub fn new(source_id: impl Into<String>, records: Vec<YearlyRecord>) -> Self {
        SourceDataset {
            source_id: source_id.into(),
            records,
        }
    }

    /// Collapse repeated years. Records are visited in parse order and a
    /// later record for the same year replaces the earlier one entirely.
    pub fn deduplicated(&self) -> BTreeMap<i32, MonthlyValues> {
        let mut by_year: BTreeMap<i32, MonthlyValues> = BTreeMap::new();
        for record in &self.records {
            by_year.insert(record.year, record.values);
        }
        by_year
    }
}

/// Parsed datasets for every configured source, kept in configured order.
#[derive(Debug, PartialEq, Clone, Default, Serialize)]
pub struct SourceStore {
    datasets: Vec<SourceDataset>,
}

impl SourceStore {
    /// Create a store with an empty dataset for each configured source.
    pub fn new<I, S>(source_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SourceStore {
            datasets: source_ids
                .into_iter()
                .map(|id| SourceDataset::new(id, Vec::new()))
                .collect(),
        }
    }

    /// Set the records of a source. Unknown ids are appended after the
    /// configured ones.
    pub fn insert(&mut self, source_id: &str, records: Vec<YearlyRecord>) {
        match self.datasets.iter_mut().find(|d| d.source_id == source_id) {
            Some(dataset) => dataset.records = records,
            None => self.datasets.push(SourceDataset::new(source_id, records)),
        }
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_records(mut self, source_id: &str, records: Vec<YearlyRecord>) -> Self {
        self.insert(source_id, records);
        self
    }

    pub fn dataset(&self, source_id: &str) -> Option<&SourceDataset> {
        self.datasets.iter().find(|d| d.source_id == source_id)
    }

    pub fn datasets(&self) -> &[SourceDataset] {
        &self.datasets
    }

    pub fn source_ids(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(|d| d.source_id.as_str())
    }

    /// The de-duplicated year -> values mapping of a source.
    pub fn records_for(&self, source_id: &str) -> Option<BTreeMap<i32, MonthlyValues>> {
        self.dataset(source_id).map(SourceDataset::deduplicated)
    }

    /// True when no source holds any record.
    pub fn is_empty(&self) -> bool {
        self.datasets.iter().all(|d| d.records.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MONTHS_PER_YEAR;

    fn filled(value: f64) -> MonthlyValues {
        [Some(value); MONTHS_PER_YEAR]
    }

    #[test]
    fn test_deduplicated_later_record_wins() {
        let dataset = SourceDataset::new(
            "A",
            vec![
                YearlyRecord::from_partial(2000, &[Some(1.0), Some(2.0)]),
                YearlyRecord::new(2001, filled(4.0)),
                YearlyRecord::new(2000, filled(9.0)),
            ],
        );
        let by_year = dataset.deduplicated();
        assert_eq!(by_year.len(), 2);
        assert_eq!(by_year[&2000], filled(9.0));
    }

    #[test]
    fn test_deduplicated_replaces_not_merges() {
        let dataset = SourceDataset::new(
            "A",
            vec![
                YearlyRecord::new(2000, filled(5.0)),
                YearlyRecord::from_partial(2000, &[Some(1.0)]),
            ],
        );
        let values = dataset.deduplicated()[&2000];
        assert_eq!(values[0], Some(1.0));
        assert!(values[1..].iter().all(Option::is_none));
    }

    #[test]
    fn test_store_keeps_configured_order() {
        let store = SourceStore::new(["B", "A"])
            .with_records("A", vec![YearlyRecord::new(1990, filled(1.0))])
            .with_records("C", vec![]);
        let ids: Vec<&str> = store.source_ids().collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
        assert!(store.dataset("B").unwrap().records.is_empty());
        assert!(store.records_for("A").unwrap().contains_key(&1990));
        assert!(store.records_for("Z").is_none());
    }

    #[test]
    fn test_store_is_empty() {
        let store = SourceStore::new(["A", "B"]);
        assert!(store.is_empty());
        let store = store.with_records("B", vec![YearlyRecord::new(1990, filled(1.0))]);
        assert!(!store.is_empty());
    }
}
