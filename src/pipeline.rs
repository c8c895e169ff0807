//! Runs the fixed questions over a loaded dataset and labels the results.
//!
//! Aggregation always works on numeric codes; labels are looked up only
//! when the rows of a [`Chart`] are built.

use chrono::Utc;
use tracing::info;

use crate::aggregate::{
    daily_totals, day_type_means, hourly_totals, seasonal_totals, weather_totals,
};
use crate::category::{Season, WeatherSituation};
use crate::derive::WeekdayConvention;
use crate::error::Result;
use crate::records::{DailyRecord, Dataset, HourlyRecord};
use crate::report::{Chart, ChartKind, ChartRow, Question, Report};
use crate::top_k::{DEFAULT_TOP_K, select_top_hours};

/// Knobs a host may set; the questions themselves are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Hours kept per AM/PM half in the peak-hours chart.
    pub top_k: usize,
    pub weekday_convention: WeekdayConvention,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            weekday_convention: WeekdayConvention::default(),
        }
    }
}

pub fn seasonal_chart(daily: &[DailyRecord]) -> Result<Chart> {
    let totals = seasonal_totals(daily)?;
    let mut rows = Vec::with_capacity(totals.len());
    for g in totals.groups() {
        rows.push(ChartRow::new(Season::try_from(g.key)?.label(), g.value));
    }

    Ok(Chart::new(
        Question::Seasonal,
        ChartKind::Bar,
        "Total Bike Rentals by Season",
        "Season",
        "Total Rentals",
        rows,
    ))
}

pub fn weather_chart(daily: &[DailyRecord]) -> Result<Chart> {
    let totals = weather_totals(daily)?;
    let mut rows = Vec::with_capacity(totals.len());
    for g in totals.groups() {
        rows.push(ChartRow::new(
            WeatherSituation::try_from(g.key)?.label(),
            g.value,
        ));
    }

    Ok(Chart::new(
        Question::Weather,
        ChartKind::Bar,
        "Total Bike Rentals by Weather Condition",
        "Weather Condition",
        "Total Rentals",
        rows,
    ))
}

pub fn peak_hours_chart(hourly: &[HourlyRecord], k: usize) -> Result<Chart> {
    let totals = hourly_totals(hourly)?;
    let rows = select_top_hours(&totals, k)
        .into_iter()
        .map(|s| ChartRow::new(s.label, s.value).with_hue(s.period.as_str()))
        .collect();

    Ok(Chart::new(
        Question::PeakHours,
        ChartKind::Bar,
        format!("Top {k} Bike Rental Hours for AM and PM"),
        "Hour",
        "Total Rentals",
        rows,
    ))
}

pub fn day_type_chart(daily: &[DailyRecord], convention: WeekdayConvention) -> Result<Chart> {
    let means = day_type_means(daily, convention)?;
    let rows = means
        .groups()
        .iter()
        .map(|g| ChartRow::new(g.key.as_str(), g.value))
        .collect();

    Ok(Chart::new(
        Question::DayType,
        ChartKind::Bar,
        "Average Bike Rentals: Weekday vs Weekend",
        "Day Type",
        "Average Rentals",
        rows,
    ))
}

pub fn trend_chart(daily: &[DailyRecord]) -> Result<Chart> {
    let totals = daily_totals(daily)?;
    let rows = totals
        .groups()
        .iter()
        .map(|g| ChartRow::new(g.key.format("%Y-%m-%d").to_string(), g.value))
        .collect();

    Ok(Chart::new(
        Question::Trend,
        ChartKind::Line,
        "Bike Rentals Over the Year",
        "Date",
        "Total Rentals",
        rows,
    ))
}

/// Builds one chart by question.
pub fn build_chart(dataset: &Dataset, question: Question, options: &ReportOptions) -> Result<Chart> {
    match question {
        Question::Seasonal => seasonal_chart(&dataset.daily),
        Question::Weather => weather_chart(&dataset.daily),
        Question::PeakHours => peak_hours_chart(&dataset.hourly, options.top_k),
        Question::DayType => day_type_chart(&dataset.daily, options.weekday_convention),
        Question::Trend => trend_chart(&dataset.daily),
    }
}

/// Answers every question, aborting on the first error.
#[tracing::instrument(skip(dataset), fields(daily_rows = dataset.daily.len(), hourly_rows = dataset.hourly.len()))]
pub fn build_report(dataset: &Dataset, options: &ReportOptions) -> Result<Report> {
    let mut charts = Vec::with_capacity(Question::ALL.len());
    for question in Question::ALL {
        let chart = build_chart(dataset, question, options)?;
        info!(question = question.slug(), rows = chart.rows.len(), "Chart built");
        charts.push(chart);
    }

    let range = dataset.date_range();
    Ok(Report {
        generated_at: Utc::now(),
        first_date: range.map(|r| r.0),
        last_date: range.map(|r| r.1),
        daily_rows: dataset.daily.len(),
        hourly_rows: dataset.hourly.len(),
        charts,
    })
}
