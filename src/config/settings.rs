//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};
use crate::utils::errors::{AutoServiceError, Result};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub booking: BookingConfig,
    pub messages: MessagesConfig,
    pub sessions: SessionsConfig,
    pub health: HealthConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// Chat that receives a summary of every completed booking
    pub admin_chat_id: Option<i64>,
}

/// Booking flow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingConfig {
    /// Append-only CSV file receiving one line per completed booking
    pub log_file: String,
    /// Suggested replies offered with the service prompt
    pub service_options: Vec<String>,
}

/// User- and operator-facing texts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessagesConfig {
    pub service_prompt: String,
    pub vehicle_prompt: String,
    pub time_prompt: String,
    pub confirmation: String,
    pub cancelled: String,
    pub start_hint: String,
    /// Template with `{service}`, `{vehicle}`, `{time_slot}`, `{display_name}`
    /// and `{conversant_id}` placeholders
    pub admin_summary: String,
}

/// Session store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionsConfig {
    /// Drop sessions untouched for this long. `None` keeps them until the
    /// conversation ends.
    pub idle_timeout_seconds: Option<u64>,
    pub sweep_interval_seconds: u64,
}

/// Liveness endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_name: String,
}

impl Settings {
    /// Load settings from `config.toml` and environment variables
    pub fn new() -> Result<Self> {
        Self::load("config")
    }

    /// Load settings from the given config file (extension optional) layered
    /// over the defaults, then `AUTOSERVICE__*` variables, then the plain
    /// `BOT_TOKEN`, `ADMIN_CHAT_ID` and `PORT` variables.
    pub fn load(config_file: &str) -> Result<Self> {
        let admin_chat_id = match std::env::var("ADMIN_CHAT_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<i64>().map_err(|_| {
                AutoServiceError::Config(format!("ADMIN_CHAT_ID is not a number: {}", raw))
            })?),
            _ => None,
        };
        let port = match std::env::var("PORT") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<u16>().map_err(|_| {
                AutoServiceError::Config(format!("PORT is not a valid port: {}", raw))
            })?),
            _ => None,
        };

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(
                config::Environment::with_prefix("AUTOSERVICE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("bot.token", std::env::var("BOT_TOKEN").ok())?
            .set_override_option("bot.admin_chat_id", admin_chat_id)?
            .set_override_option("health.port", port.map(i64::from))?
            .build()?;

        let mut settings: Settings = settings.try_deserialize()?;
        settings.bot.admin_chat_id = settings.bot.admin_chat_id.filter(|id| *id != 0);
        Ok(settings)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                admin_chat_id: None,
            },
            booking: BookingConfig {
                log_file: "requests.csv".to_string(),
                service_options: vec![
                    "Полировка".to_string(),
                    "Химчистка".to_string(),
                    "Керамика".to_string(),
                    "Другое".to_string(),
                ],
            },
            messages: MessagesConfig::default(),
            sessions: SessionsConfig {
                idle_timeout_seconds: None,
                sweep_interval_seconds: 300,
            },
            health: HealthConfig {
                enabled: true,
                host: "0.0.0.0".to_string(),
                port: 10000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: "logs".to_string(),
                file_name: "autoservice-bot.log".to_string(),
            },
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            service_prompt: "Здравствуйте! Какая услуга интересует?\n\nВыберите вариант:".to_string(),
            vehicle_prompt: "Напишите марку и модель автомобиля:".to_string(),
            time_prompt: "Когда удобно записаться?".to_string(),
            confirmation: "Спасибо! Менеджер свяжется с вами в ближайшее время.".to_string(),
            cancelled: "Операция отменена.".to_string(),
            start_hint: "Чтобы оформить заявку, отправьте /start".to_string(),
            admin_summary: "Новая заявка:\nУслуга: {service}\nАвто: {vehicle}\nВремя: {time_slot}\nПользователь: {display_name} (ID: {conversant_id})".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in ["BOT_TOKEN", "ADMIN_CHAT_ID", "PORT", "AUTOSERVICE__BOOKING__LOG_FILE"] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_sources() {
        clear_env();
        let settings = Settings::load("does-not-exist").unwrap();
        assert!(settings.bot.token.is_empty());
        assert_eq!(settings.bot.admin_chat_id, None);
        assert_eq!(settings.booking.log_file, "requests.csv");
        assert_eq!(settings.booking.service_options.len(), 4);
        assert_eq!(settings.health.port, 10000);
        assert_eq!(settings.sessions.idle_timeout_seconds, None);
    }

    #[test]
    #[serial]
    fn test_plain_env_overrides() {
        clear_env();
        std::env::set_var("BOT_TOKEN", "123:abc");
        std::env::set_var("ADMIN_CHAT_ID", "777");
        std::env::set_var("PORT", "8080");
        std::env::set_var("AUTOSERVICE__BOOKING__LOG_FILE", "/tmp/bookings.csv");

        let settings = Settings::load("does-not-exist").unwrap();
        assert_eq!(settings.bot.token, "123:abc");
        assert_eq!(settings.bot.admin_chat_id, Some(777));
        assert_eq!(settings.health.port, 8080);
        assert_eq!(settings.booking.log_file, "/tmp/bookings.csv");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_zero_admin_chat_id_means_no_admin() {
        clear_env();
        std::env::set_var("ADMIN_CHAT_ID", "0");
        let settings = Settings::load("does-not-exist").unwrap();
        assert_eq!(settings.bot.admin_chat_id, None);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_malformed_admin_chat_id_is_rejected() {
        clear_env();
        std::env::set_var("ADMIN_CHAT_ID", "admin");
        let result = Settings::load("does-not-exist");
        assert!(matches!(result, Err(AutoServiceError::Config(_))));
        clear_env();
    }
}
