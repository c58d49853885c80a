//! Runtime configuration read from the environment.
//!
//! The binary loads a `.env` file first (via `dotenv`), so every setting can
//! live there or in the real environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

use crate::error::AppError;

pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, multi-line
    #[default]
    Pretty,
    /// Human readable, one line per event
    Compact,
    /// Bunyan JSON records
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

/// Settings for logging and the host panel
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `pino_core=debug`.
    #[validate(length(min = 1))]
    pub log_filter: String,
    pub log_format: LogFormat,
    /// How long a host request may wait for the panel actor.
    #[validate(range(min = 1, max = 600_000))]
    pub request_timeout_ms: u64,
    /// Bounded size of the panel actor mailbox.
    #[validate(range(min = 1, max = 4096))]
    pub channel_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_format: LogFormat::default(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from `PINO_*` environment variables.
    ///
    /// `PINO_LOG` falls back to `RUST_LOG`. Missing variables take their
    /// defaults; present but malformed ones are an error.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let log_filter = env::var("PINO_LOG")
            .or_else(|_| env::var("RUST_LOG"))
            .unwrap_or(defaults.log_filter);

        let log_format = match env::var("PINO_LOG_FORMAT") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.log_format,
        };

        let config = Self {
            log_filter,
            log_format,
            request_timeout_ms: parse_var("PINO_REQUEST_TIMEOUT_MS", defaults.request_timeout_ms)?,
            channel_capacity: parse_var("PINO_CHANNEL_CAPACITY", defaults.channel_capacity)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}
