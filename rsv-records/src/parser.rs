//! Parsing of per-source yearly CSV text.
//!
//! Expected layout (header line is ignored):
//!
//! ```text
//! Year,Jan,Feb,Mar,Apr,May,Jun,Jul,Aug,Sep,Oct,Nov,Dec
//! 1990,10,20,,40,,,,,,,,
//! ```
//!
//! Parsing never fails. Rows that do not have the minimum shape are
//! dropped, and monthly fields that are not numbers become absent.
//! Every line is split on plain commas; quote characters have no special
//! meaning. Numbers are read from the longest leading numeric prefix of a
//! field, so `1990.0` is the year 1990 and `12.5abc` is 12.5.

use crate::record::{pad_months, YearlyRecord, MONTHS_PER_YEAR};
use csv::{ReaderBuilder, StringRecord, Trim};

/// Minimum number of fields a row needs: the year plus one month.
pub const MIN_ROW_FIELDS: usize = 2;

/// Parse raw CSV text into yearly records, in file order.
///
/// Duplicate years are kept; see [`crate::store::SourceDataset::deduplicated`].
pub fn parse_yearly_csv(raw: &str) -> Vec<YearlyRecord> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(raw.trim().as_bytes());

    let mut records = Vec::new();
    let mut skipped = 0u32;
    for result in rdr.records() {
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        match YearlyRecord::try_from(&row) {
            Ok(record) => records.push(record),
            Err(()) => skipped += 1,
        }
    }
    log::debug!(
        "[RSV] parser: parsed {} yearly records ({} rows skipped)",
        records.len(),
        skipped
    );
    records
}

/// Parse one monthly field. Empty, non-numeric and non-finite input is absent.
pub fn parse_month_value(field: &str) -> Option<f64> {
    numeric_prefix(field, true)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse the year column from its leading integer prefix.
pub fn parse_year(field: &str) -> Option<i32> {
    numeric_prefix(field, false).parse::<i32>().ok()
}

/// Longest prefix of `field` (after leading whitespace) that reads as a
/// number: optional sign, digits and, when `fractional`, a decimal part and
/// exponent. Empty when no digit is found.
fn numeric_prefix(field: &str, fractional: bool) -> &str {
    let field = field.trim_start();
    let bytes = field.as_bytes();
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;

    if fractional {
        if bytes.get(end) == Some(&b'.') {
            let frac_end = digits_from(end + 1);
            digits += frac_end - (end + 1);
            if digits > 0 {
                end = frac_end;
            }
        }
        if digits > 0 && matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp_start = end + 1;
            if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
                exp_start += 1;
            }
            let exp_end = digits_from(exp_start);
            if exp_end > exp_start {
                end = exp_end;
            }
        }
    }

    if digits == 0 {
        ""
    } else {
        &field[..end]
    }
}

impl TryFrom<&StringRecord> for YearlyRecord {
    type Error = ();

    fn try_from(row: &StringRecord) -> Result<Self, Self::Error> {
        if row.len() < MIN_ROW_FIELDS {
            return Err(());
        }
        let year = row.get(0).and_then(parse_year).ok_or(())?;
        let partial: Vec<Option<f64>> = row
            .iter()
            .skip(1)
            .take(MONTHS_PER_YEAR)
            .map(parse_month_value)
            .collect();
        Ok(YearlyRecord {
            year,
            values: pad_months(&partial),
        })
    }
}
