//! Reads the daily and hourly rental files into typed tables.
//!
//! Both files are comma-delimited with a header row. Only the columns the
//! pipeline needs are read; any others are ignored. A header-only file is a
//! valid empty table, a zero-byte file is an error.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::cell::OnceCell;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::DataSources;
use crate::error::LoadError;
use crate::records::{DailyRecord, Dataset, HourlyRecord, RawDailyRow, RawHourlyRow};

pub const DAILY_COLUMNS: &[&str] = &["dteday", "season", "weathersit", "weekday", "cnt"];
pub const HOURLY_COLUMNS: &[&str] = &["dteday", "hr", "cnt"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parses a calendar date in one of the accepted layouts.
///
/// A trailing time component (`2011-01-01 00:00:00`) is ignored.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = value.split([' ', 'T']).next().unwrap_or(value);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Loads both tables named by `sources`.
#[tracing::instrument(skip(sources), fields(daily = %sources.daily.display(), hourly = %sources.hourly.display()))]
pub fn load_dataset(sources: &DataSources) -> Result<Dataset, LoadError> {
    let daily = load_daily(&sources.daily)?;
    let hourly = load_hourly(&sources.hourly)?;

    info!(
        daily_rows = daily.len(),
        hourly_rows = hourly.len(),
        "Dataset loaded"
    );

    Ok(Dataset::new(daily, hourly))
}

pub fn load_daily(path: &Path) -> Result<Vec<DailyRecord>, LoadError> {
    let file = open_source(path)?;
    read_daily(&path.display().to_string(), file)
}

pub fn load_hourly(path: &Path) -> Result<Vec<HourlyRecord>, LoadError> {
    let file = open_source(path)?;
    read_hourly(&path.display().to_string(), file)
}

/// Reads the daily table from any reader. `name` is used in error messages.
pub fn read_daily<R: Read>(name: &str, reader: R) -> Result<Vec<DailyRecord>, LoadError> {
    let rows: Vec<(u64, RawDailyRow)> = read_rows(name, reader, DAILY_COLUMNS)?;
    let mut records = Vec::with_capacity(rows.len());
    let mut seen = HashSet::with_capacity(rows.len());

    for (line, raw) in rows {
        let date = date_cell(name, line, &raw.dteday)?;
        check_range(name, line, "weekday", raw.weekday.into(), 0, 6)?;

        if !seen.insert(date) {
            warn!(source = name, line, %date, "Duplicate date in daily table");
        }

        records.push(DailyRecord {
            date,
            season: raw.season,
            weather_situation: raw.weathersit,
            weekday: raw.weekday,
            rental_count: raw.cnt,
        });
    }

    debug!(source = name, rows = records.len(), "Daily table parsed");
    Ok(records)
}

/// Reads the hourly table from any reader. `name` is used in error messages.
pub fn read_hourly<R: Read>(name: &str, reader: R) -> Result<Vec<HourlyRecord>, LoadError> {
    let rows: Vec<(u64, RawHourlyRow)> = read_rows(name, reader, HOURLY_COLUMNS)?;
    let mut records = Vec::with_capacity(rows.len());
    let mut seen = HashSet::with_capacity(rows.len());

    for (line, raw) in rows {
        let date = date_cell(name, line, &raw.dteday)?;
        check_range(name, line, "hr", raw.hr.into(), 0, 23)?;

        if !seen.insert((date, raw.hr)) {
            warn!(source = name, line, %date, hour = raw.hr, "Duplicate hour in hourly table");
        }

        records.push(HourlyRecord {
            date,
            hour: raw.hr,
            rental_count: raw.cnt,
        });
    }

    debug!(source = name, rows = records.len(), "Hourly table parsed");
    Ok(records)
}

fn open_source(path: &Path) -> Result<File, LoadError> {
    if !path.exists() {
        return Err(LoadError::Missing {
            path: path.to_path_buf(),
        });
    }
    File::open(path).map_err(|e| LoadError::Io {
        name: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Checks the header for `required` columns, then deserializes every row.
///
/// Each row is paired with its 1-based line number in the file.
fn read_rows<R: Read, T: DeserializeOwned>(
    name: &str,
    reader: R,
    required: &[&'static str],
) -> Result<Vec<(u64, T)>, LoadError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| LoadError::Io {
            name: name.to_string(),
            message: e.to_string(),
        })?
        .clone();

    if headers.iter().all(str::is_empty) {
        return Err(LoadError::Empty {
            name: name.to_string(),
        });
    }
    check_columns(name, &headers, required)?;

    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize::<T>().enumerate() {
        let line = idx as u64 + 2;
        let row = result.map_err(|e| LoadError::Malformed {
            name: name.to_string(),
            line: e.position().map(|p| p.line()).unwrap_or(line),
            message: e.to_string(),
        })?;
        rows.push((line, row));
    }

    Ok(rows)
}

fn check_columns(
    name: &str,
    headers: &StringRecord,
    required: &[&'static str],
) -> Result<(), LoadError> {
    for &column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                name: name.to_string(),
                column,
            });
        }
    }
    Ok(())
}

fn date_cell(name: &str, line: u64, value: &str) -> Result<NaiveDate, LoadError> {
    parse_date(value).ok_or_else(|| LoadError::BadDate {
        name: name.to_string(),
        line,
        value: value.to_string(),
    })
}

fn check_range(
    name: &str,
    line: u64,
    column: &'static str,
    value: u32,
    min: u32,
    max: u32,
) -> Result<(), LoadError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(LoadError::OutOfRange {
            name: name.to_string(),
            line,
            column,
            value,
            min,
            max,
        })
    }
}

/// Load-once handle over the two base tables.
///
/// The first call to [`DatasetContext::dataset`] reads the sources; later
/// calls return the same tables. A failed load is not remembered, so the
/// next call tries again.
#[derive(Debug)]
pub struct DatasetContext {
    sources: Option<DataSources>,
    dataset: OnceCell<Dataset>,
}

impl DatasetContext {
    pub fn new(sources: DataSources) -> Self {
        Self {
            sources: Some(sources),
            dataset: OnceCell::new(),
        }
    }

    /// Wraps tables that were built or loaded elsewhere.
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            sources: None,
            dataset: OnceCell::from(dataset),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.get().is_some()
    }

    pub fn dataset(&self) -> Result<&Dataset, LoadError> {
        if let Some(dataset) = self.dataset.get() {
            return Ok(dataset);
        }

        // `from_dataset` always fills the cell, so sources exist here.
        let sources = self.sources.as_ref().ok_or_else(|| LoadError::Empty {
            name: "dataset".to_string(),
        })?;
        let loaded = load_dataset(sources)?;
        Ok(self.dataset.get_or_init(|| loaded))
    }
}
