//! Simulation route handlers.
//!
//! JSON in, JSON out; failures carry an `error` field plus a 400/401/409/500
//! status. These are demo fixtures: use a real database and JWT in
//! production.

pub mod auth;
pub mod chat;
pub mod upload;

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

/// Builds the standard error body.
pub(crate) fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}
