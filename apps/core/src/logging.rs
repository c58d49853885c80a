//! Logging initialization.
//!
//! Logs always go to stderr so stdout stays reserved for analysis output and
//! protocol responses.

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LogFormat};
use crate::error::AppError;

/// Application name stamped on bunyan records
const APP_NAME: &str = "pino";

/// Builds the env filter from the configured directive
pub fn build_filter(config: &AppConfig) -> Result<EnvFilter, AppError> {
    EnvFilter::try_new(&config.log_filter)
        .map_err(|e| AppError::Config(format!("Invalid log filter {:?}: {}", config.log_filter, e)))
}

/// Installs the global subscriber. Call once at startup.
pub fn init(config: &AppConfig) -> Result<(), AppError> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.log_format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(APP_NAME.to_string(), std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| AppError::Config(format!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_filter() {
        let config = AppConfig {
            log_filter: "warn,pino_core=debug".to_string(),
            ..AppConfig::default()
        };
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn test_invalid_filter() {
        let config = AppConfig {
            log_filter: "pino_core=notalevel".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(build_filter(&config), Err(AppError::Config(_))));
    }
}
