//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the booking flow.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{AutoServiceError, ErrorSeverity, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender(config)?);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| AutoServiceError::Config(format!("Failed to install subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Daily rolling appender in the configured directory, created if missing
fn file_appender(config: &LoggingConfig) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(config.file_name.as_str())
        .build(&config.directory)
        .map_err(|e| {
            AutoServiceError::Config(format!(
                "Cannot write logs to directory '{}': {}",
                config.directory, e
            ))
        })
}

/// Log a conversation state transition
pub fn log_transition(conversant_id: i64, from: Option<&str>, to: &str) {
    debug!(
        conversant_id = conversant_id,
        from = from,
        to = to,
        "Conversation transition"
    );
}

/// Log a finalized booking
pub fn log_booking_completed(conversant_id: i64, service: &str, vehicle: &str, time_slot: &str) {
    info!(
        conversant_id = conversant_id,
        service = service,
        vehicle = vehicle,
        time_slot = time_slot,
        "Booking request completed"
    );
}

/// Log a best-effort side effect that failed and was dropped
pub fn log_sink_failure(sink: &str, conversant_id: i64, error: &AutoServiceError) {
    match error.severity() {
        ErrorSeverity::Warning => warn!(
            sink = sink,
            conversant_id = conversant_id,
            error = %error,
            "Sink delivery failed, continuing"
        ),
        severity => error!(
            sink = sink,
            conversant_id = conversant_id,
            severity = %severity,
            error = %error,
            "Sink delivery failed, continuing"
        ),
    }
}

/// Log an outbound message that could not be delivered
pub fn log_delivery_failure(conversant_id: i64, error: &AutoServiceError) {
    match error.severity() {
        ErrorSeverity::Warning => warn!(
            conversant_id = conversant_id,
            error = %error,
            "Failed to deliver message to conversant"
        ),
        severity => error!(
            conversant_id = conversant_id,
            severity = %severity,
            error = %error,
            "Failed to deliver message to conversant"
        ),
    }
}
