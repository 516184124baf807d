//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{AutoServiceError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_booking_config(&settings.booking)?;
    validate_sessions_config(&settings.sessions)?;
    validate_health_config(&settings.health)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.trim().is_empty() {
        return Err(AutoServiceError::Config(
            "Bot token is required (set BOT_TOKEN)".to_string()
        ));
    }

    Ok(())
}

/// Validate booking configuration
fn validate_booking_config(config: &super::BookingConfig) -> Result<()> {
    if config.log_file.trim().is_empty() {
        return Err(AutoServiceError::Config(
            "Request log file path is required".to_string()
        ));
    }

    if config.service_options.is_empty() {
        return Err(AutoServiceError::Config(
            "At least one service option must be configured".to_string()
        ));
    }

    if config.service_options.iter().any(|option| option.trim().is_empty()) {
        return Err(AutoServiceError::Config(
            "Service options cannot be blank".to_string()
        ));
    }

    Ok(())
}

/// Validate session store configuration
fn validate_sessions_config(config: &super::SessionsConfig) -> Result<()> {
    if config.idle_timeout_seconds == Some(0) {
        return Err(AutoServiceError::Config(
            "Idle timeout must be greater than 0 when set".to_string()
        ));
    }

    if config.sweep_interval_seconds == 0 {
        return Err(AutoServiceError::Config(
            "Sweep interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate liveness endpoint configuration
fn validate_health_config(config: &super::HealthConfig) -> Result<()> {
    if config.enabled && config.port == 0 {
        return Err(AutoServiceError::Config(
            "Health port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(AutoServiceError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
