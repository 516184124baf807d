//! Start command handler

use std::sync::Arc;
use teloxide::types::Message;
use tracing::info;
use crate::handlers::messages::{conversant_id, display_name};
use crate::models::InboundEvent;
use crate::state::AppContext;
use crate::utils::errors::Result;

/// Handle /start: begin a new booking, discarding any unfinished one
pub async fn handle_start(msg: Message, ctx: Arc<AppContext>) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    info!(user_id = user.id.0, "Booking started");
    ctx.process(InboundEvent::start(conversant_id(user), display_name(user))).await;
    Ok(())
}
