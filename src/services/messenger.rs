//! Outbound message delivery
//!
//! The booking flow talks to conversants through [`OutboundSink`]. The
//! Telegram implementation turns suggested replies into a one-time reply
//! keyboard and removes the keyboard when a message carries none.

use async_trait::async_trait;
use teloxide::{
    Bot,
    prelude::*,
    types::{ChatId, KeyboardButton, KeyboardMarkup, KeyboardRemove, ReplyMarkup},
};
use tracing::debug;
use crate::models::OutboundMessage;
use crate::utils::errors::Result;

/// Buttons per keyboard row
const KEYBOARD_ROW_WIDTH: usize = 2;

/// Something that can deliver a message to a conversant
#[async_trait]
pub trait OutboundSink: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<()>;
}

/// Delivers messages through the Telegram Bot API
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl OutboundSink for TelegramMessenger {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        debug!(conversant_id = message.conversant_id, "Sending message");

        self.bot
            .send_message(ChatId(message.conversant_id), message.text.clone())
            .reply_markup(reply_markup(message.suggested_replies.as_deref()))
            .await?;

        Ok(())
    }
}

/// Keyboard for a message: suggestions become a one-time keyboard, no
/// suggestions removes whatever keyboard is showing
pub fn reply_markup(suggestions: Option<&[String]>) -> ReplyMarkup {
    match suggestions {
        Some(suggestions) if !suggestions.is_empty() => {
            let rows: Vec<Vec<KeyboardButton>> = suggestions
                .chunks(KEYBOARD_ROW_WIDTH)
                .map(|row| row.iter().map(|label| KeyboardButton::new(label.clone())).collect())
                .collect();

            ReplyMarkup::Keyboard(
                KeyboardMarkup::new(rows)
                    .one_time_keyboard()
                    .resize_keyboard(),
            )
        }
        _ => ReplyMarkup::KeyboardRemove(KeyboardRemove::new()),
    }
}
