//! Fixed label tables for the season and weather situation codes.
//!
//! Aggregation keys stay numeric; these labels are substituted only when
//! a chart is handed to presentation.

use serde::Serialize;
use std::fmt;

use crate::error::UnknownCategoryError;

/// The two categorical domains that carry display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryDomain {
    Season,
    Weather,
}

impl fmt::Display for CategoryDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryDomain::Season => f.write_str("season"),
            CategoryDomain::Weather => f.write_str("weather situation"),
        }
    }
}

/// Season code as recorded in the `season` column.
///
/// | Code | Label  |
/// |------|--------|
/// | 1    | Spring |
/// | 2    | Summer |
/// | 3    | Fall   |
/// | 4    | Winter |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Season {
    Spring = 1,
    Summer = 2,
    Fall = 3,
    Winter = 4,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub const fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Season {
    type Error = UnknownCategoryError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Season::Spring),
            2 => Ok(Season::Summer),
            3 => Ok(Season::Fall),
            4 => Ok(Season::Winter),
            _ => Err(UnknownCategoryError {
                domain: CategoryDomain::Season,
                code,
            }),
        }
    }
}

/// Weather situation code as recorded in the `weathersit` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WeatherSituation {
    Clear = 1,
    Mist = 2,
    LightPrecipitation = 3,
    HeavyPrecipitation = 4,
}

impl WeatherSituation {
    pub const ALL: [WeatherSituation; 4] = [
        WeatherSituation::Clear,
        WeatherSituation::Mist,
        WeatherSituation::LightPrecipitation,
        WeatherSituation::HeavyPrecipitation,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            WeatherSituation::Clear => "Clear | Few clouds",
            WeatherSituation::Mist => "Mist | Cloudy",
            WeatherSituation::LightPrecipitation => "Light Snow | Light Rain",
            WeatherSituation::HeavyPrecipitation => "Heavy Rain + Ice Pallets + Thunderstorm",
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for WeatherSituation {
    type Error = UnknownCategoryError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(WeatherSituation::Clear),
            2 => Ok(WeatherSituation::Mist),
            3 => Ok(WeatherSituation::LightPrecipitation),
            4 => Ok(WeatherSituation::HeavyPrecipitation),
            _ => Err(UnknownCategoryError {
                domain: CategoryDomain::Weather,
                code,
            }),
        }
    }
}

/// Looks up the display label for a raw `code` in `domain`.
///
/// # Errors
///
/// Returns [`UnknownCategoryError`] when `code` is not one of the four
/// codes defined for the domain.
pub fn label(code: u8, domain: CategoryDomain) -> Result<&'static str, UnknownCategoryError> {
    match domain {
        CategoryDomain::Season => Season::try_from(code).map(Season::label),
        CategoryDomain::Weather => WeatherSituation::try_from(code).map(WeatherSituation::label),
    }
}
