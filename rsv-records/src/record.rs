use serde::{Deserialize, Serialize};

/// Number of monthly slots carried by every record.
pub const MONTHS_PER_YEAR: usize = 12;

/// Twelve monthly readings, index 0 = January ... 11 = December.
/// `None` means no measurement was recorded for that month.
pub type MonthlyValues = [Option<f64>; MONTHS_PER_YEAR];

/// A single year of monthly readings from one source, as parsed.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct YearlyRecord {
    pub year: i32,
    pub values: MonthlyValues,
}

impl YearlyRecord {
    pub fn new(year: i32, values: MonthlyValues) -> Self {
        YearlyRecord { year, values }
    }

    /// Build a record from a slice of any length. Missing trailing months
    /// are absent; anything past December is dropped.
    pub fn from_partial(year: i32, partial: &[Option<f64>]) -> Self {
        YearlyRecord {
            year,
            values: pad_months(partial),
        }
    }
}

/// Pad (or truncate) a slice of readings to exactly twelve months.
pub fn pad_months(partial: &[Option<f64>]) -> MonthlyValues {
    let mut values: MonthlyValues = [None; MONTHS_PER_YEAR];
    for (slot, value) in values.iter_mut().zip(partial.iter()) {
        *slot = *value;
    }
    values
}

pub fn has_any_value(values: &MonthlyValues) -> bool {
    values.iter().any(Option::is_some)
}

/// Iterate the present readings of a year in month order.
pub fn present_values(values: &MonthlyValues) -> impl DoubleEndedIterator<Item = f64> + '_ {
    values.iter().filter_map(|v| *v)
}
