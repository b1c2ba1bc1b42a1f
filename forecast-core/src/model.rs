use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::{FetchError, ParseUnitsError};

/// Unit system requested from the API. Drives the display suffixes too.
/// Parsed case-insensitively wherever it comes from: config file, environment or flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn wind_speed_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = ParseUnitsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(ParseUnitsError(value.to_string())),
        }
    }
}

impl TryFrom<String> for Units {
    type Error = ParseUnitsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One lookup: what the user typed plus the configured unit system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub city: String,
    pub units: Units,
}

impl Query {
    pub fn new(city: impl Into<String>, units: Units) -> Self {
        Self {
            city: city.into(),
            units,
        }
    }
}

/// Flat result of a successful lookup.
///
/// Temperatures and wind speed are in the system named by `units`.
/// `sunrise` and `sunset` are wall-clock times in the local time zone.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_pct: u8,
    pub visibility_km: f64,
    pub description: String,
    pub wind_speed: f64,
    pub cloud_pct: u8,
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
    pub units: Units,
}

/// `Ok` is a report; `Err` is one of not-found, API status, or transport.
pub type FetchOutcome = Result<WeatherReport, FetchError>;
