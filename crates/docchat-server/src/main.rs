//! Local simulation server for the docchat demo.
//!
//! Serves the same-origin fixture endpoints the demo UI talks to: login,
//! register, chat ask/history/clear, and upload. Everything is in-memory and
//! simulated; use a real database and JWT in production.

mod routes;
mod state;

use anyhow::Result;
use axum::Router;
use axum::routing::{get, post};
use state::SimState;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;

const DEFAULT_ANSWER_DELAY_MS: u64 = 1500;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let bind = std::env::var("DOCCHAT_SIM_BIND").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("DOCCHAT_SIM_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{bind}:{port}");

    let delay_ms = std::env::var("DOCCHAT_SIM_ANSWER_DELAY_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_ANSWER_DELAY_MS);

    let state = Arc::new(SimState::new(Duration::from_millis(delay_ms)).await);

    let app = Router::new()
        // Auth.
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/register", post(routes::auth::register))
        // Chat.
        .route("/api/chat/ask", post(routes::chat::ask))
        .route("/api/chat/history", get(routes::chat::history))
        .route("/api/chat/clear", post(routes::chat::clear))
        // Upload.
        .route("/api/upload", post(routes::upload::upload))
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("[Sim] docchat simulation server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
