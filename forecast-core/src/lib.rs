//! Core library for the `forecast` front-end.
//!
//! This crate defines:
//! - Configuration layering (defaults, config file, `.env`, environment)
//! - The weather fetch adapter and its OpenWeatherMap implementation
//! - Shared domain models (queries, reports, fetch outcomes)
//! - Text rendering of a report
//!
//! It is used by `forecast-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;

pub use config::{Config, FileConfig};
pub use error::{FetchError, ParseUnitsError};
pub use model::{FetchOutcome, Query, Units, WeatherReport};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
