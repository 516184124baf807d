//! AutoService Bot
//!
//! Main application entry point

use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tracing::{error, info, warn};

use autoservice_bot::{
    config::Settings,
    handlers::create_handler,
    services::{ServiceFactory, health},
    state::{AppContext, SessionStore, SessionStoreManager},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", autoservice_bot::info());

    // Liveness endpoint for the hosting platform
    if settings.health.enabled {
        let health_config = settings.health.clone();
        tokio::spawn(async move {
            if let Err(e) = health::serve(&health_config).await {
                error!(error = %e, "Liveness endpoint stopped");
            }
        });
    }

    // Initialize state management
    let store = SessionStore::new();
    let _store_manager = settings.sessions.idle_timeout_seconds.map(|idle| {
        let mut manager = SessionStoreManager::new(
            store.clone(),
            Duration::from_secs(idle),
            Duration::from_secs(settings.sessions.sweep_interval_seconds),
        );
        manager.start_sweep();
        manager
    });

    // Initialize bot and services
    let bot = Bot::new(&settings.bot.token);
    let services = ServiceFactory::new(bot.clone(), &settings);
    let context = Arc::new(AppContext::from_factory(services, store, &settings));

    if settings.bot.admin_chat_id.is_none() {
        warn!("ADMIN_CHAT_ID is not set, bookings will only be written to the request log");
    }

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![context])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .enable_ctrlc_handler()
        .build();

    info!("Starting bot with polling mode...");
    dispatcher.dispatch().await;

    info!("AutoService bot has been shut down.");
    Ok(())
}
