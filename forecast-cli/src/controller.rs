//! Glue between the fetch adapter and a presentation surface.

use std::fmt;

use forecast_core::{FetchError, Query, Units, WeatherProvider, WeatherReport, format};
use tracing::{debug, info};

pub const INPUT_ERROR_TITLE: &str = "Input Error";
pub const INPUT_ERROR_MESSAGE: &str = "Please enter a city name!";

/// What the user asked for next: the two buttons, or closing the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetWeather,
    Clear,
    Quit,
}

impl Action {
    pub const fn all() -> &'static [Action] {
        &[Action::GetWeather, Action::Clear, Action::Quit]
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::GetWeather => "Get Weather",
            Action::Clear => "Clear",
            Action::Quit => "Quit",
        })
    }
}

/// Everything the window shows: the input field and the two output regions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub city_input: String,
    pub headline: String,
    pub details: String,
}

impl AppState {
    fn show(&mut self, report: &WeatherReport) {
        self.headline = format::headline(report);
        self.details = format::details(report);
    }
}

pub trait Surface {
    fn next_action(&mut self) -> Action;
    fn read_city_input(&mut self) -> String;
    fn show_error(&mut self, title: &str, message: &str);
    fn show_report(&mut self, state: &AppState);
    fn clear(&mut self);
}

/// Dialog title and message for a failed lookup.
pub fn error_dialog(err: &FetchError) -> (&'static str, String) {
    match err {
        FetchError::NotFound => (
            "City Not Found",
            "City not found. Please check the city name and try again.".to_string(),
        ),
        FetchError::Api(code) => (
            "Error",
            format!("Something went wrong. Error code: {code}"),
        ),
        FetchError::Transport(msg) => ("Connection Error", format!("An error occurred: {msg}")),
    }
}

/// Trimmed city, or `None` when there is nothing to look up.
pub fn validate_city(input: &str) -> Option<&str> {
    let city = input.trim();
    (!city.is_empty()).then_some(city)
}

pub struct App<S: Surface> {
    state: AppState,
    provider: Box<dyn WeatherProvider>,
    units: Units,
    surface: S,
}

impl<S: Surface> App<S> {
    pub fn new(provider: Box<dyn WeatherProvider>, units: Units, surface: S) -> Self {
        Self {
            state: AppState::default(),
            provider,
            units,
            surface,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Dispatch actions until the user quits. One lookup in flight at a time.
    pub async fn run(&mut self) {
        loop {
            match self.surface.next_action() {
                Action::GetWeather => self.get_weather().await,
                Action::Clear => self.clear_fields(),
                Action::Quit => break,
            }
        }
    }

    pub async fn get_weather(&mut self) {
        self.state.city_input = self.surface.read_city_input();

        let Some(city) = validate_city(&self.state.city_input) else {
            self.surface.show_error(INPUT_ERROR_TITLE, INPUT_ERROR_MESSAGE);
            return;
        };

        let query = Query::new(city, self.units);
        info!(city = %query.city, "looking up weather");

        match self.provider.fetch(&query).await {
            Ok(report) => {
                self.state.show(&report);
                self.surface.show_report(&self.state);
            }
            Err(err) => {
                debug!(error = %err, "lookup failed");
                let (title, message) = error_dialog(&err);
                self.surface.show_error(title, &message);
            }
        }
    }

    pub fn clear_fields(&mut self) {
        self.state = AppState::default();
        self.surface.clear();
    }
}
