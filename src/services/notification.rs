//! Administrator notification service
//!
//! Formats a completed booking with the configured summary template and sends
//! it to the admin chat, if one is configured.

use std::sync::Arc;
use tracing::{debug, info};
use crate::models::{BookingRecord, ConversantId, OutboundMessage};
use crate::utils::errors::Result;
use super::messenger::OutboundSink;

/// Sends booking summaries to the operator
#[derive(Clone)]
pub struct NotificationService {
    messenger: Arc<dyn OutboundSink>,
    admin_chat_id: Option<ConversantId>,
    template: String,
}

impl NotificationService {
    pub fn new(messenger: Arc<dyn OutboundSink>, admin_chat_id: Option<ConversantId>, template: impl Into<String>) -> Self {
        Self {
            messenger,
            admin_chat_id,
            template: template.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.admin_chat_id.is_some()
    }

    /// Send the summary. Returns `Ok(false)` when no admin chat is configured.
    pub async fn notify_admin(&self, record: &BookingRecord) -> Result<bool> {
        let Some(admin_chat_id) = self.admin_chat_id else {
            debug!(conversant_id = record.conversant_id, "No admin chat configured, skipping notification");
            return Ok(false);
        };

        let message = OutboundMessage::new(admin_chat_id, self.format_summary(record));
        self.messenger.send(&message).await?;

        info!(conversant_id = record.conversant_id, admin_chat_id = admin_chat_id, "Admin notified of booking");
        Ok(true)
    }

    /// Render the summary template for a record
    pub fn format_summary(&self, record: &BookingRecord) -> String {
        let conversant_id = record.conversant_id.to_string();
        let parameters = [
            ("service", record.service.as_str()),
            ("vehicle", record.vehicle.as_str()),
            ("time_slot", record.time_slot.as_str()),
            ("display_name", record.display_name.as_str()),
            ("conversant_id", conversant_id.as_str()),
        ];

        render_template(&self.template, &parameters)
    }
}

/// Replace `{key}` placeholders in one pass, so substituted values are never
/// expanded again. Unknown placeholders are kept as written.
fn render_template(template: &str, parameters: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replaced = after.find('}').and_then(|close| {
            let key = &after[..close];
            parameters
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });

        match replaced {
            Some((value, close)) => {
                output.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}
