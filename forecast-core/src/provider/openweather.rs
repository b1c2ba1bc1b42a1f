use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, instrument, warn};

use crate::{
    error::FetchError,
    format::local_time_of_day,
    model::{FetchOutcome, Query, Units, WeatherReport},
};

use super::WeatherProvider;

/// Adapter for the OpenWeatherMap current-weather endpoint.
#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: Option<String>, base_url: String) -> anyhow::Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url,
            http,
        })
    }
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    visibility: f64,
    weather: Vec<OwWeather>,
    wind: OwWind,
    clouds: OwClouds,
    sys: OwSys,
}

impl OwCurrentResponse {
    fn into_report(self, units: Units) -> FetchOutcome {
        let Some(weather) = self.weather.into_iter().next() else {
            return Err(FetchError::transport("invalid response body: no weather"));
        };

        Ok(WeatherReport {
            city: self.name,
            country: self.sys.country,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            humidity_pct: self.main.humidity,
            visibility_km: self.visibility / 1000.0,
            description: weather.description,
            wind_speed: self.wind.speed,
            cloud_pct: self.clouds.all,
            sunrise: time_of_day(self.sys.sunrise, "sunrise")?,
            sunset: time_of_day(self.sys.sunset, "sunset")?,
            units,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip_all, fields(city = %query.city, units = %query.units))]
    async fn fetch(&self, query: &Query) -> FetchOutcome {
        let mut params = vec![("q", query.city.as_str())];
        if let Some(key) = self.api_key.as_deref() {
            params.push(("appid", key));
        }
        params.push(("units", query.units.as_str()));

        let res = self
            .http
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;

        let status = res.status();
        match status {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                debug!("city not found");
                return Err(FetchError::NotFound);
            }
            other => {
                let body = res.text().await.unwrap_or_default();
                warn!(status = other.as_u16(), body = %truncate_body(&body), "weather API error");
                return Err(FetchError::Api(other.as_u16()));
            }
        }

        let body = res.text().await?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        let report = parsed.into_report(query.units)?;

        debug!(city = %report.city, country = %report.country, "weather report received");
        Ok(report)
    }
}

fn time_of_day(ts: i64, field: &str) -> Result<NaiveTime, FetchError> {
    local_time_of_day(ts).ok_or_else(|| {
        FetchError::transport(format!(
            "invalid response body: `{field}` timestamp {ts} out of range"
        ))
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
