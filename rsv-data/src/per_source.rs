//! Current value and historical maximum for each configured source.

use crate::kpi::{capacity, latest_reading};
use crate::models::PerSourceStat;
use rsv_records::store::SourceStore;

/// Stats for every source in the store, in configured order.
///
/// The source selection does not apply here. A source without readings
/// reports 0 for both values.
pub fn per_source_stats(store: &SourceStore) -> Vec<PerSourceStat> {
    store
        .datasets()
        .iter()
        .map(|dataset| {
            let by_year = dataset.deduplicated();
            let max = capacity(by_year.values());
            let current = latest_reading(by_year.iter().map(|(year, values)| (*year, values)))
                .map_or(0.0, |latest| latest.current);
            PerSourceStat {
                source_id: dataset.source_id.clone(),
                current,
                max,
            }
        })
        .collect()
}
