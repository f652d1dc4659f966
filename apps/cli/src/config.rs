//! Environment-driven configuration.

use microlearn_core::IntervalLadder;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Settings for the Gemini content generator.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub db_path: PathBuf,
    pub intervals: IntervalLadder,
    pub daily_reset_hour: u32,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Env vars:
    /// - GEMINI_API_KEY: API key for module generation
    /// - GEMINI_MODEL: model name
    /// - GEMINI_BASE_URL: API endpoint
    /// - MICROLEARN_DB: path of the progress database
    /// - MICROLEARN_INTERVALS: review intervals in days, e.g. `1,3,7,14`
    /// - MICROLEARN_DAY_RESET_HOUR: hour (0-23) when a new study day begins
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let gemini = GeminiConfig {
            api_key: var("GEMINI_API_KEY"),
            model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        };

        let db_path = var("MICROLEARN_DB")
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let intervals = match var("MICROLEARN_INTERVALS") {
            Some(list) => IntervalLadder::parse(&list).map_err(|err| ConfigError::Invalid {
                name: "MICROLEARN_INTERVALS",
                message: err.to_string(),
            })?,
            None => IntervalLadder::default(),
        };

        let daily_reset_hour = match var("MICROLEARN_DAY_RESET_HOUR") {
            Some(raw) => parse_reset_hour(&raw)?,
            None => 0,
        };

        Ok(Self {
            gemini,
            db_path,
            intervals,
            daily_reset_hour,
        })
    }
}

fn parse_reset_hour(raw: &str) -> Result<u32, ConfigError> {
    let invalid = || ConfigError::Invalid {
        name: "MICROLEARN_DAY_RESET_HOUR",
        message: format!("{raw:?} is not an hour between 0 and 23"),
    };
    let hour: u32 = raw.trim().parse().map_err(|_| invalid())?;
    if hour > 23 {
        return Err(invalid());
    }
    Ok(hour)
}

fn default_db_path() -> PathBuf {
    // Use app data directory, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("microlearn")
        .join("progress.db")
}
