//! Per-month historical statistics across every combined year.
//!
//! Every year in the sequence contributes, including whichever year the
//! caller is about to compare against these statistics.

use crate::models::{CombinedYearRecord, MonthlyHistoricalStat};
use rsv_records::record::MONTHS_PER_YEAR;

/// Min, average and max of each month over all present readings.
///
/// Missing readings are excluded from both the sum and the divisor. A
/// month without any reading reports zeros.
pub fn historical_stats(combined: &[CombinedYearRecord]) -> [MonthlyHistoricalStat; MONTHS_PER_YEAR] {
    let mut sums = [0.0f64; MONTHS_PER_YEAR];
    let mut mins = [f64::INFINITY; MONTHS_PER_YEAR];
    let mut maxs = [f64::NEG_INFINITY; MONTHS_PER_YEAR];
    let mut counts = [0usize; MONTHS_PER_YEAR];

    for record in combined {
        for (i, value) in record.values.iter().enumerate() {
            if let Some(v) = *value {
                sums[i] += v;
                mins[i] = mins[i].min(v);
                maxs[i] = maxs[i].max(v);
                counts[i] += 1;
            }
        }
    }

    std::array::from_fn(|i| {
        if counts[i] == 0 {
            MonthlyHistoricalStat {
                month_index: i,
                min: 0.0,
                average: 0.0,
                max: 0.0,
                sample_count: 0,
            }
        } else {
            MonthlyHistoricalStat {
                month_index: i,
                min: mins[i],
                average: sums[i] / counts[i] as f64,
                max: maxs[i],
                sample_count: counts[i],
            }
        }
    })
}
