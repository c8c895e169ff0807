//! Categorical fields derived from existing columns before grouping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weekday versus weekend classification of a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub const fn as_str(self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Weekend => "Weekend",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half of the day an hour falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Period {
    AM,
    PM,
}

impl Period {
    pub const fn as_str(self) -> &'static str {
        match self {
            Period::AM => "AM",
            Period::PM => "PM",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which day the `weekday` column counts from.
///
/// `MondayZero` puts the weekend at 5 and 6. `SundayZero` (the encoding of
/// the UCI bike-sharing files) puts it at 6 and 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeekdayConvention {
    #[default]
    MondayZero,
    SundayZero,
}

/// Classifies a weekday using the `>= 5` rule.
pub fn day_type(weekday: u8) -> DayType {
    day_type_with(weekday, WeekdayConvention::MondayZero)
}

/// Classifies a weekday under an explicit encoding.
pub fn day_type_with(weekday: u8, convention: WeekdayConvention) -> DayType {
    let weekend = match convention {
        WeekdayConvention::MondayZero => weekday >= 5,
        WeekdayConvention::SundayZero => weekday == 0 || weekday >= 6,
    };
    if weekend {
        DayType::Weekend
    } else {
        DayType::Weekday
    }
}

pub fn period(hour: u8) -> Period {
    if hour < 12 { Period::AM } else { Period::PM }
}

/// Renders a 24-hour `hour` on the 12-hour clock, e.g. `17` -> `"5 PM"`.
///
/// Midnight and noon both read as `12`.
pub fn hour_label(hour: u8, period: Period) -> String {
    let twelve = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{twelve} {period}")
}
