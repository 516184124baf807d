//! Booking flow models

use serde::{Deserialize, Serialize};

/// Stable identity of the person talking to the bot (Telegram user id)
pub type ConversantId = i64;

/// One user-originated message, already classified by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub conversant_id: ConversantId,
    pub display_name: String,
    pub text: String,
    pub is_start: bool,
    pub is_cancel: bool,
}

impl InboundEvent {
    /// Plain text message
    pub fn text(conversant_id: ConversantId, display_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            conversant_id,
            display_name: display_name.into(),
            text: text.into(),
            is_start: false,
            is_cancel: false,
        }
    }

    /// `/start` command
    pub fn start(conversant_id: ConversantId, display_name: impl Into<String>) -> Self {
        Self {
            is_start: true,
            ..Self::text(conversant_id, display_name, "/start")
        }
    }

    /// `/cancel` command
    pub fn cancel(conversant_id: ConversantId, display_name: impl Into<String>) -> Self {
        Self {
            is_cancel: true,
            ..Self::text(conversant_id, display_name, "/cancel")
        }
    }
}

/// Message the bot sends back to a conversant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub conversant_id: ConversantId,
    pub text: String,
    /// Ordered reply suggestions. `None` clears any suggestions still shown.
    pub suggested_replies: Option<Vec<String>>,
}

impl OutboundMessage {
    pub fn new(conversant_id: ConversantId, text: impl Into<String>) -> Self {
        Self {
            conversant_id,
            text: text.into(),
            suggested_replies: None,
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggested_replies = Some(suggestions);
        self
    }
}

/// Finalized booking request, produced once per completed conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub conversant_id: ConversantId,
    pub display_name: String,
    pub service: String,
    pub vehicle: String,
    pub time_slot: String,
}

impl BookingRecord {
    /// Request log line: conversant id, service, vehicle, time slot.
    /// Fields holding separators, quotes or line breaks are quoted.
    pub fn to_log_line(&self) -> String {
        format!(
            "{},{},{},{}",
            self.conversant_id,
            escape_field(&self.service),
            escape_field(&self.vehicle),
            escape_field(&self.time_slot),
        )
    }
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
