//! AutoService Bot
//!
//! A Telegram bot that books appointments for an auto detailing shop. It asks
//! for a service, the vehicle and a convenient time, then writes the request to
//! an append-only log and forwards a summary to the operator.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{AutoServiceError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;
pub use state::{AppContext, BookingEngine, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
