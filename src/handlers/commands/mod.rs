//! Command handlers module
//!
//! This module contains handlers for the bot commands `/start` and `/cancel`.

pub mod cancel;
pub mod start;

use std::sync::Arc;
use teloxide::{types::Message, utils::command::BotCommands};
use crate::state::AppContext;
use crate::utils::errors::Result;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Book a service")]
    Start,
    #[command(description = "Cancel the current booking")]
    Cancel,
}

/// Main command dispatcher
pub async fn handle_command(msg: Message, cmd: Command, ctx: Arc<AppContext>) -> Result<()> {
    match cmd {
        Command::Start => start::handle_start(msg, ctx).await,
        Command::Cancel => cancel::handle_cancel(msg, ctx).await,
    }
}
