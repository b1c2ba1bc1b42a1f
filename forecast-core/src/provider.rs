use crate::{Config, FetchOutcome, Query, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// One lookup against a weather backend. Exactly one upstream call per invocation.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, query: &Query) -> FetchOutcome;
}

/// Construct the OpenWeatherMap adapter from the effective config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::new(config.api_key.clone(), config.base_url.clone())?;
    Ok(Box::new(provider))
}
