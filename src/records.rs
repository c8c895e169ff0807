//! In-memory row types for the daily and hourly rental tables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::derive::{DayType, Period, WeekdayConvention, day_type_with, period};

/// One row per calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Raw season code; labelled only at presentation time.
    pub season: u8,
    /// Raw weather situation code.
    pub weather_situation: u8,
    pub weekday: u8,
    pub rental_count: u32,
}

impl DailyRecord {
    pub fn day_type(&self, convention: WeekdayConvention) -> DayType {
        day_type_with(self.weekday, convention)
    }
}

/// One row per (date, hour) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRecord {
    pub date: NaiveDate,
    pub hour: u8,
    pub rental_count: u32,
}

impl HourlyRecord {
    pub fn period(&self) -> Period {
        period(self.hour)
    }
}

/// Daily row exactly as it appears in the source file. Extra columns are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDailyRow {
    pub(crate) dteday: String,
    pub(crate) season: u8,
    pub(crate) weathersit: u8,
    pub(crate) weekday: u8,
    pub(crate) cnt: u32,
}

/// Hourly row exactly as it appears in the source file.
#[derive(Debug, Deserialize)]
pub(crate) struct RawHourlyRow {
    pub(crate) dteday: String,
    pub(crate) hr: u8,
    pub(crate) cnt: u32,
}

/// The two base tables of one pipeline run.
///
/// Downstream stages only ever borrow this; nothing mutates it after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub daily: Vec<DailyRecord>,
    pub hourly: Vec<HourlyRecord>,
}

impl Dataset {
    pub fn new(daily: Vec<DailyRecord>, hourly: Vec<HourlyRecord>) -> Self {
        Self { daily, hourly }
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty() && self.hourly.is_empty()
    }

    /// First and last date of the daily table, if it has any rows.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.daily.iter().map(|r| r.date).min()?;
        let last = self.daily.iter().map(|r| r.date).max()?;
        Some((first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(date: NaiveDate, weekday: u8) -> DailyRecord {
        DailyRecord {
            date,
            season: 1,
            weather_situation: 1,
            weekday,
            rental_count: 10,
        }
    }

    #[test]
    fn test_date_range_empty() {
        assert_eq!(Dataset::default().date_range(), None);
        assert!(Dataset::default().is_empty());
    }

    #[test]
    fn test_date_range_unsorted_rows() {
        let ds = Dataset::new(
            vec![
                daily(date(2011, 3, 1), 2),
                daily(date(2011, 1, 1), 6),
                daily(date(2012, 12, 31), 1),
            ],
            vec![],
        );
        assert_eq!(
            ds.date_range(),
            Some((date(2011, 1, 1), date(2012, 12, 31)))
        );
    }

    #[test]
    fn test_record_derivations() {
        let rec = daily(date(2011, 1, 1), 6);
        assert_eq!(rec.day_type(WeekdayConvention::MondayZero), DayType::Weekend);

        let hr = HourlyRecord {
            date: date(2011, 1, 1),
            hour: 13,
            rental_count: 4,
        };
        assert_eq!(hr.period(), Period::PM);
    }
}
