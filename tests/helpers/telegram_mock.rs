//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Bot whose requests go to this server
    pub fn bot(&self) -> teloxide::Bot {
        teloxide::Bot::new(test_bot_token())
            .set_api_url(self.server.uri().parse().expect("mock server uri is a valid url"))
    }

    /// Answer every sendMessage call successfully
    pub async fn mock_send_message_ok(&self) {
        let body = json!({
            "ok": true,
            "result": {
                "message_id": 123,
                "date": 1640995200,
                "chat": {
                    "id": 42,
                    "type": "private",
                    "first_name": "Test"
                },
                "text": "ok"
            }
        });

        Mock::given(method("POST"))
            .and(path(send_message_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Reject every sendMessage call
    pub async fn mock_send_message_error(&self) {
        let body = json!({
            "ok": false,
            "error_code": 403,
            "description": "Forbidden: bot was blocked by the user"
        });

        Mock::given(method("POST"))
            .and(path(send_message_path()))
            .respond_with(ResponseTemplate::new(403).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of all sendMessage requests received so far
    pub async fn sent_messages(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == send_message_path())
            .map(|request| serde_json::from_slice(&request.body).expect("sendMessage body is JSON"))
            .collect()
    }
}

/// Path teloxide posts sendMessage calls to
pub fn send_message_path() -> String {
    format!("/bot{}/SendMessage", test_bot_token())
}

/// Helper function to create a test bot token
pub fn test_bot_token() -> String {
    "12345:test_token".to_string()
}
