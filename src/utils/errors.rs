//! Error handling for AutoService Bot
//!
//! This module defines the main error type used throughout the application.
//! Only configuration errors are fatal; everything raised after startup is
//! caught at a sink boundary and logged.

use thiserror::Error;

/// Main error type for AutoService Bot
#[derive(Error, Debug)]
pub enum AutoServiceError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request log error ({path}): {source}")]
    RequestLog {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for AutoService Bot operations
pub type Result<T> = std::result::Result<T, AutoServiceError>;

impl AutoServiceError {
    /// Get error severity level
    ///
    /// Telegram failures are usually one conversant blocking the bot, so they
    /// only warrant a warning.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AutoServiceError::Config(_) => ErrorSeverity::Critical,
            AutoServiceError::ConfigLoad(_) => ErrorSeverity::Critical,
            AutoServiceError::Telegram(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
