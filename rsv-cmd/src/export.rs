//! CSV export of the monthly comparison rows.
//!
//! Every field is quoted and a missing reading is written as an empty field:
//!
//! ```text
//! "Month","Historical Min","Historical Average","Historical Max","2023"
//! "January","80.5","120.25","160","131"
//! ```

use crate::Context;
use csv::{QuoteStyle, WriterBuilder};
use log::info;
use rsv_data::dashboard::DashboardView;

/// Default file name for an export of `year`.
pub fn default_export_path(year: Option<i32>) -> String {
    match year {
        Some(year) => format!("reservoirs_{}.csv", year),
        None => "reservoirs.csv".to_string(),
    }
}

/// Serialise the monthly rows of a view.
pub fn monthly_rows_csv(view: &DashboardView) -> anyhow::Result<String> {
    let year_column = view
        .selected_year
        .map_or_else(|| "Selected Year".to_string(), |year| year.to_string());

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    wtr.write_record([
        "Month",
        "Historical Min",
        "Historical Average",
        "Historical Max",
        year_column.as_str(),
    ])?;
    for row in &view.monthly_rows {
        wtr.write_record([
            row.month.clone(),
            row.historical_min.to_string(),
            row.historical_average.to_string(),
            row.historical_max.to_string(),
            row.selected_value.map_or_else(String::new, |v| v.to_string()),
        ])?;
    }
    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV export: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

pub fn run_export(context: &Context, output: Option<&str>) -> anyhow::Result<()> {
    let view = context.view();
    let path = output.map_or_else(|| default_export_path(view.selected_year), str::to_string);
    let csv = monthly_rows_csv(&view)?;
    std::fs::write(&path, csv)?;
    info!("[RSV] export: wrote {} monthly rows to {}", view.monthly_rows.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsv_data::selection::SourceSelection;
    use rsv_records::parser::parse_yearly_csv;
    use rsv_records::store::SourceStore;

    fn sample_context(year: Option<i32>) -> Context {
        let mut store = SourceStore::new(["north"]);
        store.insert("north", parse_yearly_csv("Year,Jan,Feb\n2022,10,20\n2023,30,\n"));
        Context::new(store, SourceSelection::new(["north"]), year)
    }

    #[test]
    fn default_export_path_uses_year() {
        assert_eq!(default_export_path(Some(2023)), "reservoirs_2023.csv");
        assert_eq!(default_export_path(None), "reservoirs.csv");
    }

    #[test]
    fn csv_quotes_every_field_and_blanks_missing() {
        let context = sample_context(Some(2023));
        let view = context.view();
        let csv = monthly_rows_csv(&view).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(
            lines[0],
            r#""Month","Historical Min","Historical Average","Historical Max","2023""#
        );
        assert_eq!(lines[1], r#""January","10","20","30","30""#);
        assert_eq!(lines[2], r#""February","20","20","20","""#);
        assert_eq!(lines[3], r#""March","0","0","0","""#);
    }

    #[test]
    fn run_export_writes_file() {
        let context = sample_context(Some(2022));
        let path = std::env::temp_dir().join(format!("rsv-export-{}.csv", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        run_export(&context, Some(&path_str)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(r#""Month""#));
        assert!(written.contains(r#""January","10","20","30","10""#));
        std::fs::remove_file(path).ok();
    }
}
