//! Test context for booking flow tests
//!
//! Builds the real application context around a recording outbound sink and
//! a request log inside a temporary directory.

use std::sync::{Arc, Mutex, Once};
use async_trait::async_trait;
use tempfile::TempDir;

use autoservice_bot::{
    AppContext, AutoServiceError, Result, ServiceFactory, SessionStore, Settings,
    models::{ConversantId, InboundEvent, OutboundMessage},
    services::OutboundSink,
    state::Transition,
};

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Admin chat used by the default test settings
pub const ADMIN_CHAT_ID: ConversantId = 777;

/// Outbound sink that keeps every message it is asked to deliver
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<OutboundMessage>>,
    failing_chat: Mutex<Option<ConversantId>>,
}

impl RecordingMessenger {
    /// Make every delivery to `chat` fail after recording it
    pub fn fail_deliveries_to(&self, chat: ConversantId) {
        *self.failing_chat.lock().unwrap() = Some(chat);
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat: ConversantId) -> Vec<OutboundMessage> {
        self.sent()
            .into_iter()
            .filter(|message| message.conversant_id == chat)
            .collect()
    }
}

#[async_trait]
impl OutboundSink for RecordingMessenger {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        self.sent.lock().unwrap().push(message.clone());

        if *self.failing_chat.lock().unwrap() == Some(message.conversant_id) {
            return Err(AutoServiceError::Telegram(teloxide::RequestError::Api(
                teloxide::ApiError::BotBlocked,
            )));
        }
        Ok(())
    }
}

/// Application context wired to test doubles
pub struct TestContext {
    pub temp_dir: TempDir,
    pub settings: Settings,
    pub messenger: Arc<RecordingMessenger>,
    pub app: AppContext,
}

impl TestContext {
    /// Context with an admin chat and a writable request log
    pub fn new() -> Self {
        Self::with_settings(|_, _| {})
    }

    /// Context with settings adjusted by `configure`. The request log path
    /// defaults to a file inside the temporary directory.
    pub fn with_settings(configure: impl FnOnce(&mut Settings, &TempDir)) -> Self {
        init_test_env();

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut settings = Settings::default();
        settings.bot.token = "12345:test_token".to_string();
        settings.bot.admin_chat_id = Some(ADMIN_CHAT_ID);
        settings.booking.log_file = temp_dir.path().join("requests.csv").display().to_string();
        configure(&mut settings, &temp_dir);

        let messenger = Arc::new(RecordingMessenger::default());
        let factory = ServiceFactory::with_messenger(messenger.clone(), &settings);
        let app = AppContext::from_factory(factory, SessionStore::new(), &settings);

        Self {
            temp_dir,
            settings,
            messenger,
            app,
        }
    }

    pub async fn send(&self, event: InboundEvent) -> Transition {
        self.app.process(event).await
    }

    pub fn store(&self) -> &SessionStore {
        self.app.engine.store()
    }

    /// Request log contents, empty if nothing was written
    pub fn log_contents(&self) -> String {
        std::fs::read_to_string(&self.settings.booking.log_file).unwrap_or_default()
    }
}
