//! Message handlers module
//!
//! Turns incoming Telegram text messages into booking events.

use std::sync::Arc;
use teloxide::types::{Message, User};
use tracing::debug;
use crate::models::InboundEvent;
use crate::state::AppContext;
use crate::utils::errors::Result;

/// Handle an incoming plain text message in a private chat
pub async fn handle_message(msg: Message, ctx: Arc<AppContext>) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        debug!(chat_id = ?msg.chat.id, "Ignoring message without sender");
        return Ok(());
    };

    let Some(text) = msg.text() else {
        debug!(user_id = user.id.0, "Ignoring non-text message");
        return Ok(());
    };

    // Unrecognised commands are not booking answers.
    if text.starts_with('/') {
        debug!(user_id = user.id.0, command = text, "Ignoring unknown command");
        return Ok(());
    }

    ctx.process(InboundEvent::text(conversant_id(user), display_name(user), text)).await;
    Ok(())
}

/// Conversant id for a Telegram user
pub fn conversant_id(user: &User) -> i64 {
    user.id.0 as i64
}

/// `@username` when the user has one, otherwise their full name
pub fn display_name(user: &User) -> String {
    match &user.username {
        Some(username) => format!("@{}", username),
        None => user.full_name(),
    }
}
