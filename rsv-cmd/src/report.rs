//! Text reports printed by the `summary`, `table` and `sources` commands.

use crate::Context;
use chrono::Local;
use rsv_data::dashboard::DashboardView;
use rsv_utils::format::{format_signed_tenths, format_tenths};

fn year_label(view: &DashboardView) -> String {
    view.selected_year
        .map_or_else(|| "-".to_string(), |year| year.to_string())
}

fn header(view: &DashboardView) -> String {
    format!(
        "Reservoirs: {} | year {} | generated {}",
        view.selected_sources.join(" + "),
        year_label(view),
        Local::now().format("%Y-%m-%d %H:%M")
    )
}

/// Capacity, reserve, status and per-source lines.
pub fn render_summary(view: &DashboardView) -> String {
    let kpis = &view.kpis;
    let reference = kpis
        .reference_year
        .map_or_else(|| "no data".to_string(), |y| y.to_string());
    let lines = [
        header(view),
        format!("Capacity:          {:.1}", kpis.capacity),
        format!("Current reserve:   {:.1} ({})", kpis.current_reserve, reference),
        format!("Capacity used:     {:.1}%", kpis.capacity_percentage),
        format!(
            "Monthly variation: {}",
            format_signed_tenths(Some(kpis.monthly_variation))
        ),
        format!("Status:            {}", view.status.label()),
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    out.push_str(&render_sources(view));
    out
}

/// Per-source current and maximum values, plus the selectable years.
pub fn render_sources(view: &DashboardView) -> String {
    let mut lines = vec![format!("{:<16} {:>10} {:>10}", "Source", "Current", "Max")];
    for stat in &view.per_source {
        let marker = if view.selected_sources.contains(&stat.source_id) {
            "*"
        } else {
            " "
        };
        lines.push(format!(
            "{}{:<15} {:>10.1} {:>10.1}",
            marker, stat.source_id, stat.current, stat.max
        ));
    }
    lines.push(match (view.available_years.first(), view.available_years.last()) {
        (Some(first), Some(last)) => format!(
            "Years available: {}-{} ({} years)",
            first,
            last,
            view.available_years.len()
        ),
        _ => "Years available: none".to_string(),
    });
    lines.join("\n") + "\n"
}

/// Month by month comparison of the selected year with its history.
pub fn render_table(view: &DashboardView) -> String {
    let mut lines = vec![
        header(view),
        format!(
            "{:<10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            "Month",
            "Hist. Min",
            "Hist. Avg",
            "Hist. Max",
            year_label(view),
            "vs Avg"
        ),
    ];
    lines.extend(view.monthly_rows.iter().map(|row| {
        format!(
            "{:<10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            row.month,
            format_tenths(Some(row.historical_min)),
            format_tenths(Some(row.historical_average)),
            format_tenths(Some(row.historical_max)),
            format_tenths(row.selected_value),
            format_signed_tenths(row.difference_from_average)
        )
    }));
    lines.join("\n") + "\n"
}

pub fn run_summary(context: &Context, json: bool) -> anyhow::Result<()> {
    let view = context.view();
    if json {
        println!("{}", serde_json::to_string_pretty(&*view)?);
    } else {
        print!("{}", render_summary(&view));
    }
    Ok(())
}

pub fn run_table(context: &Context) -> anyhow::Result<()> {
    print!("{}", render_table(&context.view()));
    Ok(())
}

pub fn run_sources(context: &Context) -> anyhow::Result<()> {
    print!("{}", render_sources(&context.view()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsv_data::dashboard::build_view;
    use rsv_data::selection::SourceSelection;
    use rsv_records::parser::parse_yearly_csv;
    use rsv_records::store::SourceStore;

    fn sample_view(selected: &[&str]) -> DashboardView {
        let mut store = SourceStore::new(["north", "south"]);
        store.insert(
            "north",
            parse_yearly_csv("Year,Jan,Feb,Mar\n1990,100,90,80\n1991,110,,95\n"),
        );
        store.insert("south", parse_yearly_csv("Year,Jan,Feb,Mar\n1990,20,,10\n"));
        build_view(&store, &SourceSelection::new(selected.iter().copied()), Some(1991))
    }

    #[test]
    fn summary_lists_kpis_and_status() {
        let text = render_summary(&sample_view(&["north", "south"]));
        // capacity 120 (1990 Jan), reserve 95 after 110
        assert!(text.contains("Capacity:          120.0"));
        assert!(text.contains("Current reserve:   95.0 (1991)"));
        assert!(text.contains("Monthly variation: -15.0"));
        assert!(text.contains("Status:            Normal"));
    }

    #[test]
    fn sources_marks_selected() {
        let text = render_sources(&sample_view(&["south"]));
        assert!(text.contains("*south"));
        assert!(text.contains(" north"));
        assert!(text.contains("Years available: 1990-1991 (2 years)"));
    }

    #[test]
    fn sources_without_data_has_no_years() {
        let store = SourceStore::new(["north"]);
        let view = build_view(&store, &SourceSelection::new(["north"]), None);
        let text = render_sources(&view);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("*north"));
        assert_eq!(lines[2], "Years available: none");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn table_has_twelve_month_rows() {
        let text = render_table(&sample_view(&["north"]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 14);
        assert!(lines[1].contains("1991"));
        assert!(lines[2].starts_with("January"));
        assert!(lines[3].contains("—"));
    }
}
