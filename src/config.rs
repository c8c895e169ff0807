//! Where the two source tables live.

use std::path::{Path, PathBuf};

pub const DAILY_FILE_NAME: &str = "day.csv";
pub const HOURLY_FILE_NAME: &str = "hour.csv";

/// Overrides the daily table path.
pub const DAILY_ENV: &str = "BIKE_DAILY_CSV";
/// Overrides the hourly table path.
pub const HOURLY_ENV: &str = "BIKE_HOURLY_CSV";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub daily: PathBuf,
    pub hourly: PathBuf,
}

impl DataSources {
    pub fn new(daily: impl Into<PathBuf>, hourly: impl Into<PathBuf>) -> Self {
        Self {
            daily: daily.into(),
            hourly: hourly.into(),
        }
    }

    /// `day.csv` and `hour.csv` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(DAILY_FILE_NAME), dir.join(HOURLY_FILE_NAME))
    }

    /// Starts from [`DataSources::in_dir`] and applies `BIKE_DAILY_CSV` /
    /// `BIKE_HOURLY_CSV` when they are set.
    pub fn from_env(default_dir: impl AsRef<Path>) -> Self {
        Self::in_dir(default_dir).with_overrides(
            std::env::var(DAILY_ENV).ok(),
            std::env::var(HOURLY_ENV).ok(),
        )
    }

    /// Replaces either path when an override is given.
    pub fn with_overrides(
        mut self,
        daily: Option<impl Into<PathBuf>>,
        hourly: Option<impl Into<PathBuf>>,
    ) -> Self {
        if let Some(daily) = daily {
            self.daily = daily.into();
        }
        if let Some(hourly) = hourly {
            self.hourly = hourly.into();
        }
        self
    }
}
