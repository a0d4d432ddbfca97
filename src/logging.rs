//! # Structured Logging Module
//!
//! Environment-aware structured logging for schema loading and print dispatch.
//! Output is human-readable by default and JSON lines when configured.

use crate::config::{LoggingSettings, SettingsLoader};
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging.
///
/// Only the first call installs a subscriber. A global subscriber installed by
/// the host beforehand is kept.
pub fn init_structured_logging(settings: &LoggingSettings) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = SettingsLoader::detect_environment();
        let log_level = settings
            .level
            .clone()
            .unwrap_or_else(|| get_log_level(&environment).to_string());

        let json_layer = settings.json.then(|| {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .json()
        });
        let pretty_layer = (!settings.json).then(|| {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(true)
        });

        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(log_level.clone()))
            .with(json_layer)
            .with(pretty_layer);

        if subscriber.try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }

        tracing::info!(
            environment = %environment,
            level = %log_level,
            json = settings.json,
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log structured data for schema load operations
pub fn log_schema_operation(
    operation: &str,
    entity: &str,
    action: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        entity = %entity,
        action = action,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "📐 SCHEMA_OPERATION"
    );
}

/// Log structured data for print dispatch operations
pub fn log_print_operation(
    operation: &str,
    entity: &str,
    queue: Option<&str>,
    job_id: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        entity = %entity,
        queue = queue,
        job_id = job_id,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "🖨️ PRINT_OPERATION"
    );
}
