//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for `/start` and `/cancel`
//! - Message handlers for booking answers
//!
//! Only private chats take part in the booking flow; messages from groups
//! and channels are consumed quietly. Replies go to the conversant's own chat.

pub mod commands;
pub mod messages;

pub use commands::{Command, handle_command};
pub use messages::handle_message;

use std::sync::Arc;
use teloxide::{dispatching::{UpdateFilterExt, UpdateHandler}, prelude::*};
use tracing::{debug, error};
use crate::state::AppContext;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
type HandlerResult = Result<(), HandlerError>;

/// Create the main update handler
pub fn create_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .branch(
            // Groups and channels are not part of the booking flow
            dptree::filter(|msg: Message| !msg.chat.is_private()).endpoint(ignore_non_private),
        )
        .branch(
            // Handle commands
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(dispatch_command),
        )
        .branch(
            // Handle booking answers
            dptree::endpoint(dispatch_message),
        )
}

async fn ignore_non_private(msg: Message) -> HandlerResult {
    debug!(chat_id = msg.chat.id.0, "Ignoring message outside a private chat");
    Ok(())
}

async fn dispatch_command(msg: Message, cmd: Command, ctx: Arc<AppContext>) -> HandlerResult {
    if let Err(e) = handle_command(msg, cmd, ctx).await {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

async fn dispatch_message(msg: Message, ctx: Arc<AppContext>) -> HandlerResult {
    if let Err(e) = handle_message(msg, ctx).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}
