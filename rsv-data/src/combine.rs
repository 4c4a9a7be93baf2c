//! Merging of the selected sources into one yearly sequence.

use crate::models::CombinedYearRecord;
use rsv_records::record::{MonthlyValues, MONTHS_PER_YEAR};
use rsv_records::store::SourceStore;
use std::collections::{BTreeMap, BTreeSet};

/// Add two readings where a missing reading contributes nothing.
///
/// Two missing readings stay missing; they never turn into zero.
pub fn add_readings(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (None, None) => None,
        (Some(x), None) | (None, Some(x)) => Some(x),
        (Some(x), Some(y)) => Some(x + y),
    }
}

/// Element-wise [`add_readings`] over twelve months.
pub fn add_months(a: &MonthlyValues, b: &MonthlyValues) -> MonthlyValues {
    let mut sum: MonthlyValues = [None; MONTHS_PER_YEAR];
    for (i, slot) in sum.iter_mut().enumerate() {
        *slot = add_readings(a[i], b[i]);
    }
    sum
}

/// Sum the de-duplicated records of every selected source, year by year.
///
/// Years are the union over the selected sources and the result is
/// ascending by year. Ids that are not in the store are ignored; an empty
/// selection gives an empty result.
pub fn combine(store: &SourceStore, selected: &BTreeSet<String>) -> Vec<CombinedYearRecord> {
    let mut by_year: BTreeMap<i32, MonthlyValues> = BTreeMap::new();

    for dataset in store.datasets() {
        if !selected.contains(&dataset.source_id) {
            continue;
        }
        for (year, values) in dataset.deduplicated() {
            by_year
                .entry(year)
                .and_modify(|sum| *sum = add_months(sum, &values))
                .or_insert(values);
        }
    }

    let combined: Vec<CombinedYearRecord> = by_year
        .into_iter()
        .map(|(year, values)| CombinedYearRecord { year, values })
        .collect();
    log::debug!(
        "[RSV] combine: {} sources selected, {} combined years",
        selected.len(),
        combined.len()
    );
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsv_records::record::{pad_months, YearlyRecord};

    fn selection(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn sample_store() -> SourceStore {
        SourceStore::new(["A", "B"])
            .with_records(
                "A",
                vec![
                    YearlyRecord::from_partial(2001, &[None, Some(5.0)]),
                    YearlyRecord::from_partial(1999, &[Some(1.0)]),
                ],
            )
            .with_records(
                "B",
                vec![
                    YearlyRecord::from_partial(2001, &[None, None]),
                    YearlyRecord::from_partial(2003, &[Some(7.0)]),
                ],
            )
    }

    #[test]
    fn add_readings_is_null_aware() {
        assert_eq!(add_readings(None, None), None);
        assert_eq!(add_readings(None, Some(3.0)), Some(3.0));
        assert_eq!(add_readings(Some(2.0), None), Some(2.0));
        assert_eq!(add_readings(Some(2.0), Some(3.0)), Some(5.0));
    }

    #[test]
    fn combine_absent_plus_absent_stays_absent() {
        let combined = combine(&sample_store(), &selection(&["A", "B"]));
        let y2001 = combined.iter().find(|r| r.year == 2001).unwrap();
        assert_eq!(y2001.values[0], None);
        assert_eq!(y2001.values[1], Some(5.0));
        assert!(y2001.values[2..].iter().all(Option::is_none));
    }

    #[test]
    fn combine_unions_years_ascending() {
        let combined = combine(&sample_store(), &selection(&["A", "B"]));
        let years: Vec<i32> = combined.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![1999, 2001, 2003]);
    }

    #[test]
    fn combine_respects_selection() {
        let combined = combine(&sample_store(), &selection(&["B"]));
        let years: Vec<i32> = combined.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2001, 2003]);
    }

    #[test]
    fn combine_empty_selection_is_empty() {
        assert!(combine(&sample_store(), &BTreeSet::new()).is_empty());
    }

    #[test]
    fn combine_ignores_unknown_sources() {
        let combined = combine(&sample_store(), &selection(&["Z"]));
        assert!(combined.is_empty());
    }

    #[test]
    fn combine_uses_last_duplicate_year() {
        let store = SourceStore::new(["A"]).with_records(
            "A",
            vec![
                YearlyRecord::new(2000, pad_months(&[Some(1.0), Some(2.0)])),
                YearlyRecord::new(2000, pad_months(&[Some(9.0), Some(9.0)])),
            ],
        );
        let combined = combine(&store, &selection(&["A"]));
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].values[0], Some(9.0));
        assert_eq!(combined[0].values[1], Some(9.0));
    }

    #[test]
    fn combine_two_sources_end_to_end() {
        let mut a = vec![Some(5.0)];
        a.extend([Some(0.0); 10]);
        a.push(Some(10.0));
        let mut b = vec![Some(3.0)];
        b.extend([Some(0.0); 10]);
        b.push(Some(2.0));
        let store = SourceStore::new(["A", "B"])
            .with_records("A", vec![YearlyRecord::from_partial(1990, &a)])
            .with_records("B", vec![YearlyRecord::from_partial(1990, &b)]);

        let combined = combine(&store, &selection(&["A", "B"]));
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].values[0], Some(8.0));
        assert_eq!(combined[0].values[5], Some(0.0));
        assert_eq!(combined[0].values[11], Some(12.0));
    }
}
