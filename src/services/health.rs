//! Liveness endpoint
//!
//! A tiny HTTP responder so the hosting platform sees the process as alive.
//! It shares no state with the booking flow.

use axum::{Router, http::header, response::IntoResponse, routing::get};
use tokio::net::TcpListener;
use tracing::info;
use crate::config::HealthConfig;
use crate::utils::errors::Result;

/// Answers `GET` on any path, so whatever probe path the host uses succeeds
pub fn router() -> Router {
    Router::new()
        .route("/", get(alive))
        .route("/health", get(alive))
        .fallback(get(alive))
}

async fn alive() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], "OK")
}

/// Bind the configured address and serve until the process exits
pub async fn serve(config: &HealthConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Liveness endpoint listening on {}", addr);

    axum::serve(listener, router()).await?;
    Ok(())
}
