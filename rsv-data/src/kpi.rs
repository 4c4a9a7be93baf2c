//! Headline indicators: capacity, current reserve and monthly variation.

use crate::models::{CombinedYearRecord, KpiSnapshot};
use rsv_records::record::{has_any_value, present_values, MonthlyValues};

/// The most recent readings of a yearly series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatestReading {
    pub year: i32,
    /// Last present reading of `year`.
    pub current: f64,
    /// Present reading before `current` in the same year, if there is one.
    pub previous: Option<f64>,
}

/// Find the latest reading of a series given in ascending year order.
///
/// Years are scanned from the most recent backwards and the first year with
/// any reading is used. Within that year the last present month is the
/// current reading and the present month before it (not necessarily the
/// adjacent one) is the previous reading.
pub fn latest_reading<'a, I>(ascending: I) -> Option<LatestReading>
where
    I: DoubleEndedIterator<Item = (i32, &'a MonthlyValues)>,
{
    let (year, values) = ascending.rev().find(|(_, values)| has_any_value(values))?;
    let mut readings = present_values(values).rev();
    let current = readings.next()?;
    Some(LatestReading {
        year,
        current,
        previous: readings.next(),
    })
}

/// Largest present value across every month, never below 0.
pub fn capacity<'a, I>(series: I) -> f64
where
    I: IntoIterator<Item = &'a MonthlyValues>,
{
    series
        .into_iter()
        .flat_map(|values| present_values(values))
        .fold(0.0, f64::max)
}

/// Derive the capacity, reserve and variation indicators of a combined
/// sequence (ascending by year, as produced by [`crate::combine::combine`]).
pub fn derive_kpis(combined: &[CombinedYearRecord]) -> KpiSnapshot {
    let capacity = capacity(combined.iter().map(|r| &r.values));

    let Some(latest) = latest_reading(combined.iter().map(|r| (r.year, &r.values))) else {
        return KpiSnapshot {
            capacity,
            ..KpiSnapshot::default()
        };
    };

    let current_reserve = latest.current;
    let previous_reserve = latest.previous.unwrap_or(0.0);
    let capacity_percentage = if capacity > 0.0 {
        current_reserve / capacity * 100.0
    } else {
        0.0
    };

    log::debug!(
        "[RSV] kpi: capacity {:.1}, reserve {:.1} in {}",
        capacity,
        current_reserve,
        latest.year
    );

    KpiSnapshot {
        capacity,
        current_reserve,
        previous_reserve,
        capacity_percentage,
        monthly_variation: current_reserve - previous_reserve,
        reference_year: Some(latest.year),
    }
}
