use bike_share_stats::aggregate::{seasonal_totals, weather_totals};
use bike_share_stats::derive::WeekdayConvention;
use bike_share_stats::output::export_csv_dir;
use bike_share_stats::{
    DataSources, DatasetContext, LoadError, PipelineError, Question, ReportOptions, build_report,
    load_dataset,
};
use std::path::Path;

fn fixtures() -> DataSources {
    DataSources::in_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

#[test]
fn test_full_pipeline() {
    let ctx = DatasetContext::new(fixtures());
    let dataset = ctx.dataset().expect("Failed to load fixtures");

    assert_eq!(dataset.daily.len(), 8);
    assert_eq!(dataset.hourly.len(), 48);

    let report = build_report(dataset, &ReportOptions::default()).unwrap();
    assert_eq!(report.charts.len(), 5);
    assert_eq!(report.first_date.unwrap().to_string(), "2011-01-01");
    assert_eq!(report.last_date.unwrap().to_string(), "2011-12-26");

    let seasons = report.chart(Question::Seasonal).unwrap();
    let rows: Vec<(&str, f64)> = seasons
        .rows
        .iter()
        .map(|r| (r.label.as_str(), r.value))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Spring", 4135.0),
            ("Summer", 1600.0),
            ("Fall", 9800.0),
            ("Winter", 4000.0)
        ]
    );
    assert_eq!(seasons.highest().unwrap().label, "Fall");
    assert_eq!(seasons.lowest().unwrap().label, "Summer");

    let weather = report.chart(Question::Weather).unwrap();
    assert_eq!(weather.rows.len(), 3);
    assert_eq!(weather.rows[0].label, "Clear | Few clouds");
    assert_eq!(weather.rows[0].value, 11149.0);
    assert_eq!(weather.rows[2].label, "Light Snow | Light Rain");

    let peaks = report.chart(Question::PeakHours).unwrap();
    let labels: Vec<&str> = peaks.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["7 AM", "8 AM", "9 AM", "11 AM", "4 PM", "5 PM", "6 PM", "7 PM"]
    );
    assert_eq!(peaks.highest().unwrap().label, "5 PM");
    assert_eq!(peaks.highest().unwrap().value, 922.0);

    let day_types = report.chart(Question::DayType).unwrap();
    assert_eq!(day_types.rows[0].label, "Weekday");
    assert_eq!(day_types.rows[0].value, 1787.5);
    assert_eq!(day_types.rows[1].label, "Weekend");
    assert_eq!(day_types.rows[1].value, 3096.25);

    let trend = report.chart(Question::Trend).unwrap();
    let dates: Vec<&str> = trend.rows.iter().map(|r| r.label.as_str()).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    assert_eq!(dates.last(), Some(&"2011-12-26"));
}

#[test]
fn test_partition_sums_match_table_total() {
    let dataset = load_dataset(&fixtures()).unwrap();
    let total: f64 = dataset.daily.iter().map(|r| r.rental_count as f64).sum();

    assert_eq!(seasonal_totals(&dataset.daily).unwrap().total(), total);
    assert_eq!(weather_totals(&dataset.daily).unwrap().total(), total);
}

#[test]
fn test_sunday_zero_convention_changes_weekend() {
    let dataset = load_dataset(&fixtures()).unwrap();
    let options = ReportOptions {
        weekday_convention: WeekdayConvention::SundayZero,
        ..ReportOptions::default()
    };
    let report = build_report(&dataset, &options).unwrap();
    let day_types = report.chart(Question::DayType).unwrap();

    // Weekend is now weekday codes 0 and 6: 985, 801, 4800, 4000.
    assert_eq!(day_types.rows[1].label, "Weekend");
    assert_eq!(day_types.rows[1].value, 2646.5);
}

#[test]
fn test_header_only_files_give_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    let sources = DataSources::in_dir(dir.path());
    std::fs::write(&sources.daily, "dteday,season,weathersit,weekday,cnt\n").unwrap();
    std::fs::write(&sources.hourly, "dteday,hr,cnt\n").unwrap();

    let dataset = load_dataset(&sources).unwrap();
    let report = build_report(&dataset, &ReportOptions::default()).unwrap();

    assert!(report.charts.iter().all(|c| c.rows.is_empty()));
    assert_eq!(report.daily_rows, 0);
}

#[test]
fn test_missing_hourly_file_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let sources = DataSources::in_dir(dir.path());
    std::fs::copy(fixtures().daily, &sources.daily).unwrap();

    let err = load_dataset(&sources).unwrap_err();
    assert!(matches!(err, LoadError::Missing { ref path } if path.ends_with("hour.csv")));
}

#[test]
fn test_unknown_season_aborts_report() {
    let dir = tempfile::tempdir().unwrap();
    let sources = DataSources::in_dir(dir.path());
    std::fs::write(
        &sources.daily,
        "dteday,season,weathersit,weekday,cnt\n2011-01-01,5,1,6,10\n",
    )
    .unwrap();
    std::fs::write(&sources.hourly, "dteday,hr,cnt\n2011-01-01,0,10\n").unwrap();

    let dataset = load_dataset(&sources).unwrap();
    let err = build_report(&dataset, &ReportOptions::default()).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownCategory(e) if e.code == 5));
    assert_eq!(err.to_string(), "unknown season code 5");
}

#[test]
fn test_export_csv_from_fixtures() {
    let dataset = load_dataset(&fixtures()).unwrap();
    let report = build_report(&dataset, &ReportOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let written = export_csv_dir(dir.path(), &report).unwrap();
    assert_eq!(written.len(), 5);

    let seasonal = std::fs::read_to_string(dir.path().join("seasonal.csv")).unwrap();
    assert!(seasonal.starts_with("label,value,hue\nSpring,4135,\n"));
}
