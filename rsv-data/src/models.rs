//! Output model structs for the reservoir level pipeline.
//!
//! All structs derive `Serialize` so they can be handed to a presentation
//! layer as JSON.

use rsv_records::record::MonthlyValues;
use serde::Serialize;

/// The selected-sources sum for one year.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CombinedYearRecord {
    pub year: i32,
    /// Twelve monthly sums; `None` where no selected source had a reading.
    pub values: MonthlyValues,
}

/// Historical statistics for one calendar month across all combined years.
///
/// When no year has a reading for the month, `min`, `average` and `max`
/// are all 0 and `sample_count` is 0.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MonthlyHistoricalStat {
    /// Zero-based month (0 = January).
    pub month_index: usize,
    pub min: f64,
    pub average: f64,
    pub max: f64,
    /// Number of years with a reading for this month.
    pub sample_count: usize,
}

/// Headline indicators derived from the combined sequence.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct KpiSnapshot {
    /// All-time maximum combined value, never below 0.
    pub capacity: f64,
    /// Last reading of the most recent year with any data.
    pub current_reserve: f64,
    /// Reading preceding `current_reserve` in the same year, or 0.
    pub previous_reserve: f64,
    /// `current_reserve` as a percentage of `capacity` (0 when capacity is 0).
    pub capacity_percentage: f64,
    /// `current_reserve - previous_reserve`.
    pub monthly_variation: f64,
    /// Year `current_reserve` was read from.
    pub reference_year: Option<i32>,
}

/// Current value and historical maximum of a single source.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PerSourceStat {
    pub source_id: String,
    pub current: f64,
    pub max: f64,
}

/// One month of the selected year set against its history.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyComparisonRow {
    pub month_index: usize,
    pub month: String,
    pub historical_min: f64,
    pub historical_average: f64,
    pub historical_max: f64,
    /// Combined reading of the selected year, if any.
    pub selected_value: Option<f64>,
    /// `selected_value - historical_average`; absent when either is missing
    /// or the average is 0.
    pub difference_from_average: Option<f64>,
}

/// Qualitative band for the capacity percentage.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ReserveStatus {
    Normal,
    Low,
    Critical,
}

impl ReserveStatus {
    pub const NORMAL_THRESHOLD: f64 = 75.0;
    pub const LOW_THRESHOLD: f64 = 40.0;

    /// Band a percentage after clamping it to [0, 100].
    pub fn from_percentage(percentage: f64) -> Self {
        let clamped = percentage.clamp(0.0, 100.0);
        if clamped >= Self::NORMAL_THRESHOLD {
            ReserveStatus::Normal
        } else if clamped >= Self::LOW_THRESHOLD {
            ReserveStatus::Low
        } else {
            ReserveStatus::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReserveStatus::Normal => "Normal",
            ReserveStatus::Low => "Low",
            ReserveStatus::Critical => "Critical",
        }
    }
}

impl KpiSnapshot {
    pub fn status(&self) -> ReserveStatus {
        ReserveStatus::from_percentage(self.capacity_percentage)
    }
}
