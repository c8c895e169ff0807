//! Output formatting and persistence for reports.
//!
//! Supports pretty-printing, JSON serialization, and per-chart CSV files
//! for whatever renders the charts.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::report::{Chart, Report};
use csv::WriterBuilder;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Logs a one-line summary per chart, naming its highest and lowest rows.
pub fn print_summary(report: &Report) {
    for chart in &report.charts {
        let highest = chart.highest().map(|r| (r.label.as_str(), r.value));
        let lowest = chart.lowest().map(|r| (r.label.as_str(), r.value));
        info!(
            question = chart.question.slug(),
            title = %chart.title,
            rows = chart.rows.len(),
            ?highest,
            ?lowest,
            "Chart"
        );
    }
}

pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the report as pretty JSON, replacing any existing file.
pub fn write_json(path: &Path, report: &Report) -> Result<()> {
    let json = to_json(report)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "Report written");
    Ok(())
}

/// Writes a chart's rows to a CSV file with a `label,value,hue` header.
pub fn write_chart_csv(path: &Path, chart: &Chart) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(["label", "value", "hue"])?;
    for row in &chart.rows {
        let value = row.value.to_string();
        writer.write_record([
            row.label.as_str(),
            value.as_str(),
            row.hue.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = chart.rows.len(), "Chart CSV written");
    Ok(())
}

/// Writes one `<question>.csv` per chart into `dir`, creating it if needed.
pub fn export_csv_dir(dir: &Path, report: &Report) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut written = Vec::with_capacity(report.charts.len());
    for chart in &report.charts {
        let path = dir.join(format!("{}.csv", chart.question.slug()));
        write_chart_csv(&path, chart)?;
        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "CSV export complete");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ChartKind, ChartRow, Question};
    use chrono::Utc;

    fn sample_report() -> Report {
        Report {
            generated_at: Utc::now(),
            first_date: None,
            last_date: None,
            daily_rows: 0,
            hourly_rows: 0,
            charts: vec![
                Chart::new(
                    Question::Seasonal,
                    ChartKind::Bar,
                    "Total Bike Rentals by Season",
                    "Season",
                    "Total Rentals",
                    vec![ChartRow::new("Spring", 150.0), ChartRow::new("Fall", 200.0)],
                ),
                Chart::new(
                    Question::PeakHours,
                    ChartKind::Bar,
                    "Top 4 Bike Rental Hours for AM and PM",
                    "Hour",
                    "Total Rentals",
                    vec![ChartRow::new("8 AM", 9.0).with_hue("AM")],
                ),
            ],
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_report());
        print_summary(&sample_report());
    }

    #[test]
    fn test_to_json_contains_charts() {
        let json = to_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["charts"].as_array().unwrap().len(), 2);
        assert_eq!(value["charts"][1]["rows"][0]["hue"], "AM");
    }

    #[test]
    fn test_write_json_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_json(&path, &sample_report()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Total Bike Rentals by Season"));
    }

    #[test]
    fn test_write_chart_csv_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seasonal.csv");

        write_chart_csv(&path, &sample_report().charts[0]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec!["label,value,hue", "Spring,150,", "Fall,200,"]);
    }

    #[test]
    fn test_export_csv_dir_one_file_per_chart() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("charts");

        let written = export_csv_dir(&out, &sample_report()).unwrap();

        assert_eq!(written.len(), 2);
        assert!(out.join("seasonal.csv").exists());
        let peak = fs::read_to_string(out.join("peak_hours.csv")).unwrap();
        assert!(peak.contains("8 AM,9,AM"));
    }
}
