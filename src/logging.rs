//! # Structured Logging Module
//!
//! Environment-aware structured logging for scope construction. Library code only
//! emits `tracing` events; hosts and test suites call [`init_structured_logging`]
//! once to install a subscriber.

use crate::config::SearchableConfig;
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging using configuration from the environment
pub fn init_structured_logging() {
    let config = SearchableConfig::from_env().unwrap_or_default();
    init_with_config(&config);
}

/// Initialize structured logging with an explicit configuration
pub fn init_with_config(config: &SearchableConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
        let json_layer = config
            .log_json
            .then(|| fmt::layer().json().with_target(true).with_level(true));
        let text_layer = (!config.log_json).then(|| {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
        });

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .with(text_layer);

        // A host (or another test) may already own the global subscriber
        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            environment = %environment,
            log_level = %log_level,
            json = config.log_json,
            timestamp = %Utc::now().to_rfc3339(),
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("SEARCHABLE_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    if let Ok(level) = std::env::var("SEARCHABLE_LOG_LEVEL") {
        return level;
    }

    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}
