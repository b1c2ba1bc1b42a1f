//! Human-readable rendering of a [`WeatherReport`].

use chrono::{DateTime, Local, NaiveTime};

use crate::model::WeatherReport;

/// 12-hour clock with AM/PM, e.g. `06:05 AM`.
pub fn clock_12h(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Local wall-clock time of day for a Unix timestamp in seconds.
pub fn local_time_of_day(unix_secs: i64) -> Option<NaiveTime> {
    DateTime::from_timestamp(unix_secs, 0)
        .map(|utc| utc.with_timezone(&Local).time())
}

pub fn headline(report: &WeatherReport) -> String {
    format!("Weather Forecast for {} ({})", report.city, report.country)
}

pub fn details(report: &WeatherReport) -> String {
    let t = report.units.temperature_suffix();

    [
        format!(
            "Temperature: {:.1}{t} (Min: {:.1}{t}, Max: {:.1}{t})",
            report.temperature, report.temp_min, report.temp_max
        ),
        format!("Feels Like: {:.1}{t}", report.feels_like),
        format!("Sky: {}", capitalize(&report.description)),
        format!("Humidity: {}%", report.humidity_pct),
        format!(
            "Wind Speed: {} {}",
            report.wind_speed,
            report.units.wind_speed_suffix()
        ),
        format!("Cloud Cover: {}%", report.cloud_pct),
        format!("Visibility: {:.1} km", report.visibility_km),
        format!("Sunrise: {}", clock_12h(report.sunrise)),
        format!("Sunset: {}", clock_12h(report.sunset)),
    ]
    .join("\n")
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
