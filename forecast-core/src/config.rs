use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf};

use crate::model::Units;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

pub const API_KEY_VAR: &str = "API_KEY";
pub const BASE_URL_VAR: &str = "BASE_URL";
pub const UNITS_VAR: &str = "UNITS";

/// Settings stored on disk. Every key is optional.
///
/// Example TOML:
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5/weather"
/// units = "metric"
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub units: Option<Units>,
}

impl fmt::Debug for FileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .finish()
    }
}

impl FileConfig {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Effective settings after layering defaults, the config file and the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Absent key is sent as no `appid` at all; upstream then answers 401.
    pub api_key: Option<String>,
    pub base_url: String,
    pub units: Units,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            units: Units::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .finish()
    }
}

impl Config {
    /// Defaults, then the config file, then `.env`, then the process environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let file = FileConfig::load()?;
        let mut cfg = Self::default();
        cfg.apply_file(&file);
        cfg.apply_env(|name| std::env::var(name).ok())?;

        Ok(cfg)
    }

    pub fn apply_file(&mut self, file: &FileConfig) {
        if let Some(key) = non_empty(file.api_key.as_deref()) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_empty(file.base_url.as_deref()) {
            self.base_url = url;
        }
        if let Some(units) = file.units {
            self.units = units;
        }
    }

    /// Overlay `API_KEY`, `BASE_URL` and `UNITS` as returned by `lookup`. Empty values are skipped.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = non_empty(lookup(API_KEY_VAR).as_deref()) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_empty(lookup(BASE_URL_VAR).as_deref()) {
            self.base_url = url;
        }
        if let Some(units) = non_empty(lookup(UNITS_VAR).as_deref()) {
            self.units = units
                .parse()
                .with_context(|| format!("Invalid {UNITS_VAR} environment value"))?;
        }

        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
