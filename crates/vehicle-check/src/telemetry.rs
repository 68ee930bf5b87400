//! Tracing setup for the vehicle check service.
//!
//! Verbosity comes from `RUST_LOG` when set, otherwise from the configured
//! `APP_LOG_LEVEL`. Local development keeps ANSI colour and event targets so
//! engine stages are easy to follow; every other environment emits plain
//! compact lines for log shippers.

use crate::config::{AppEnvironment, TelemetryConfig};
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(
                    f,
                    "invalid log level/filter '{}': unable to build EnvFilter",
                    value
                )
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Install the global subscriber. Call once at startup, before the first
/// analysis runs.
pub fn init(environment: AppEnvironment, config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let interactive = environment == AppEnvironment::Development;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_target(interactive)
        .compact()
        .with_ansi(interactive)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => {
            EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: level.to_string(),
        }
    }

    #[test]
    fn falls_back_to_the_configured_level() {
        std::env::remove_var("RUST_LOG");
        let filter = env_filter(&config("vehicle_check=debug,info")).expect("filter builds");
        assert!(filter.to_string().contains("vehicle_check=debug"));
    }

    #[test]
    fn rejects_an_unparseable_filter() {
        std::env::remove_var("RUST_LOG");
        let error = env_filter(&config("vehicle_check=[nonsense")).expect_err("filter is invalid");
        assert!(matches!(error, TelemetryError::EnvFilter { .. }));
    }
}
