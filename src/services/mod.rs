//! Services module
//!
//! Collaborators of the booking engine: message delivery, the request log,
//! operator notification and the liveness endpoint.

pub mod booking_sink;
pub mod health;
pub mod messenger;
pub mod notification;
pub mod request_log;

// Re-export commonly used services
pub use booking_sink::{BookingSink, DeliveryReport, RecordSink};
pub use messenger::{OutboundSink, TelegramMessenger};
pub use notification::NotificationService;
pub use request_log::RequestLog;

use std::sync::Arc;
use teloxide::Bot;
use crate::config::settings::Settings;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub messenger: Arc<dyn OutboundSink>,
    pub booking_sink: Arc<dyn RecordSink>,
}

impl ServiceFactory {
    /// Create the Telegram-backed services
    pub fn new(bot: Bot, settings: &Settings) -> Self {
        let messenger: Arc<dyn OutboundSink> = Arc::new(TelegramMessenger::new(bot));
        Self::with_messenger(messenger, settings)
    }

    /// Create services around an arbitrary outbound sink
    pub fn with_messenger(messenger: Arc<dyn OutboundSink>, settings: &Settings) -> Self {
        let notifications = NotificationService::new(
            messenger.clone(),
            settings.bot.admin_chat_id,
            settings.messages.admin_summary.clone(),
        );
        let request_log = RequestLog::new(&settings.booking.log_file);
        let booking_sink: Arc<dyn RecordSink> = Arc::new(BookingSink::new(request_log, notifications));

        Self {
            messenger,
            booking_sink,
        }
    }
}
