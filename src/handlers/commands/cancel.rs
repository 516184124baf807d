//! Cancel command handler

use std::sync::Arc;
use teloxide::types::Message;
use crate::handlers::messages::{conversant_id, display_name};
use crate::models::InboundEvent;
use crate::state::AppContext;
use crate::utils::errors::Result;

/// Handle /cancel
pub async fn handle_cancel(msg: Message, ctx: Arc<AppContext>) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    ctx.process(InboundEvent::cancel(conversant_id(user), display_name(user))).await;
    Ok(())
}
