//! Labelled tables handed to an external renderer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::cmp::Ordering;

/// The fixed analytical questions, in the order they are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    Seasonal,
    Weather,
    PeakHours,
    DayType,
    Trend,
}

impl Question {
    pub const ALL: [Question; 5] = [
        Question::Seasonal,
        Question::Weather,
        Question::PeakHours,
        Question::DayType,
        Question::Trend,
    ];

    /// Stable identifier, used for file names.
    pub const fn slug(self) -> &'static str {
        match self {
            Question::Seasonal => "seasonal",
            Question::Weather => "weather",
            Question::PeakHours => "peak_hours",
            Question::DayType => "day_type",
            Question::Trend => "trend",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub label: String,
    pub value: f64,
    /// Secondary grouping for colouring, e.g. `AM`/`PM`.
    pub hue: Option<String>,
}

impl ChartRow {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            hue: None,
        }
    }

    pub fn with_hue(mut self, hue: impl Into<String>) -> Self {
        self.hue = Some(hue.into());
        self
    }
}

/// One question's answer: ordered rows plus title and axis captions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub question: Question,
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub rows: Vec<ChartRow>,
}

impl Chart {
    pub fn new(
        question: Question,
        kind: ChartKind,
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        rows: Vec<ChartRow>,
    ) -> Self {
        Self {
            question,
            kind,
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            rows,
        }
    }

    /// Row with the largest value; the first one wins a tie.
    pub fn highest(&self) -> Option<&ChartRow> {
        self.extreme(Ordering::Greater)
    }

    /// Row with the smallest value; the first one wins a tie.
    pub fn lowest(&self) -> Option<&ChartRow> {
        self.extreme(Ordering::Less)
    }

    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    fn extreme(&self, wanted: Ordering) -> Option<&ChartRow> {
        self.rows.iter().fold(None, |best, row| match best {
            Some(b) if row.value.partial_cmp(&b.value) != Some(wanted) => Some(b),
            _ => Some(row),
        })
    }
}

/// Every chart produced by one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub daily_rows: usize,
    pub hourly_rows: usize,
    pub charts: Vec<Chart>,
}

impl Report {
    pub fn chart(&self, question: Question) -> Option<&Chart> {
        self.charts.iter().find(|c| c.question == question)
    }
}
