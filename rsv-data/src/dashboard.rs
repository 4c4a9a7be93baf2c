//! Everything a presentation layer needs for one (selection, year) pair.
//!
//! [`build_view`] runs the whole pipeline from scratch. [`DashboardCache`]
//! wraps it and skips the work when the datasets, the selection and the
//! selected year are structurally unchanged since the previous call.

use crate::combine::combine;
use crate::historical::historical_stats;
use crate::kpi::derive_kpis;
use crate::models::{
    CombinedYearRecord, KpiSnapshot, MonthlyComparisonRow, MonthlyHistoricalStat, PerSourceStat,
    ReserveStatus,
};
use crate::per_source::per_source_stats;
use crate::selection::SourceSelection;
use rsv_records::record::MONTHS_PER_YEAR;
use rsv_records::store::SourceStore;
use rsv_utils::months::month_name;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Years before this are not offered for selection.
pub const MIN_VALID_YEAR: i32 = 1978;

/// Result of one full pipeline run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub selected_year: Option<i32>,
    pub selected_sources: Vec<String>,
    pub available_years: Vec<i32>,
    pub combined: Vec<CombinedYearRecord>,
    pub historical: [MonthlyHistoricalStat; MONTHS_PER_YEAR],
    pub kpis: KpiSnapshot,
    pub status: ReserveStatus,
    pub per_source: Vec<PerSourceStat>,
    pub monthly_rows: Vec<MonthlyComparisonRow>,
}

/// Every year present in any source (selected or not), ascending, from
/// [`MIN_VALID_YEAR`] on.
pub fn available_years(store: &SourceStore) -> Vec<i32> {
    store
        .datasets()
        .iter()
        .flat_map(|d| d.records.iter().map(|r| r.year))
        .filter(|year| *year >= MIN_VALID_YEAR)
        .collect::<BTreeSet<i32>>()
        .into_iter()
        .collect()
}

/// The requested year, or the latest available one.
pub fn resolve_year(requested: Option<i32>, available: &[i32]) -> Option<i32> {
    requested.or_else(|| available.last().copied())
}

/// Pair each month's history with the selected year's combined reading.
pub fn monthly_rows(
    combined: &[CombinedYearRecord],
    historical: &[MonthlyHistoricalStat; MONTHS_PER_YEAR],
    selected_year: Option<i32>,
) -> Vec<MonthlyComparisonRow> {
    let year_values = selected_year
        .and_then(|year| combined.iter().find(|r| r.year == year))
        .map(|r| r.values);

    historical
        .iter()
        .map(|stat| {
            let i = stat.month_index;
            let selected_value = year_values.and_then(|values| values[i]);
            let difference_from_average = match selected_value {
                Some(v) if stat.average != 0.0 => Some(v - stat.average),
                _ => None,
            };
            MonthlyComparisonRow {
                month_index: i,
                month: month_name(i).unwrap_or_default().to_string(),
                historical_min: stat.min,
                historical_average: stat.average,
                historical_max: stat.max,
                selected_value,
                difference_from_average,
            }
        })
        .collect()
}

/// Run the whole pipeline for a selection and year.
pub fn build_view(
    store: &SourceStore,
    selection: &SourceSelection,
    selected_year: Option<i32>,
) -> DashboardView {
    let combined = combine(store, selection.ids());
    let historical = historical_stats(&combined);
    let kpis = derive_kpis(&combined);
    let monthly_rows = monthly_rows(&combined, &historical, selected_year);

    DashboardView {
        selected_year,
        selected_sources: selection.ids().iter().cloned().collect(),
        available_years: available_years(store),
        status: kpis.status(),
        per_source: per_source_stats(store),
        combined,
        historical,
        kpis,
        monthly_rows,
    }
}

/// Structural hash of every input of [`build_view`].
pub fn fingerprint(store: &SourceStore, selection: &SourceSelection, selected_year: Option<i32>) -> u64 {
    let mut hasher = DefaultHasher::new();
    for dataset in store.datasets() {
        dataset.source_id.hash(&mut hasher);
        dataset.records.len().hash(&mut hasher);
        for record in &dataset.records {
            record.year.hash(&mut hasher);
            for value in &record.values {
                value.map(f64::to_bits).hash(&mut hasher);
            }
        }
    }
    selection.hash(&mut hasher);
    selected_year.hash(&mut hasher);
    hasher.finish()
}

/// Memoises the last [`DashboardView`], keyed by [`fingerprint`].
#[derive(Debug, Default)]
pub struct DashboardCache {
    cached: Option<(u64, Rc<DashboardView>)>,
    computations: usize,
}

impl DashboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the view for these inputs, recomputing only when they differ
    /// from the previous call.
    pub fn view(
        &mut self,
        store: &SourceStore,
        selection: &SourceSelection,
        selected_year: Option<i32>,
    ) -> Rc<DashboardView> {
        let key = fingerprint(store, selection, selected_year);
        if let Some((cached_key, view)) = &self.cached {
            if *cached_key == key {
                return Rc::clone(view);
            }
        }
        let view = Rc::new(build_view(store, selection, selected_year));
        self.cached = Some((key, Rc::clone(&view)));
        self.computations += 1;
        log::debug!("[RSV] dashboard: recomputed view #{}", self.computations);
        view
    }

    /// How many times the pipeline actually ran.
    pub fn computations(&self) -> usize {
        self.computations
    }
}
