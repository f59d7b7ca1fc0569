//! Login and registration fixtures.
//!
//! Tokens are base64 of `username:millis` — a stand-in, not a credential.

use crate::routes::error_response;
use crate::state::{SimState, UserRecord};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use docchat_core::storage::Storage;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn issue_token(username: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    BASE64.encode(format!("{username}:{millis}"))
}

/// Looks a user up by username, falling back to email match.
async fn find_user(state: &SimState, login: &str) -> Option<UserRecord> {
    if let Some(user) = state.users.get(login).await {
        return Some(user);
    }
    state
        .users
        .list()
        .await
        .into_iter()
        .map(|(_, user)| user)
        .find(|user| user.email == login)
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<Arc<SimState>>,
    Json(request): Json<LoginRequest>,
) -> (StatusCode, Json<Value>) {
    let (Some(username), Some(password)) = (request.username, request.password) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing username or password");
    };

    let Some(user) = find_user(&state, &username).await else {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid credentials");
    };
    if user.password != password {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }

    tracing::info!("[Auth] Login for {}", user.username);
    (
        StatusCode::OK,
        Json(json!({
            "message": "Login successful",
            "token": issue_token(&user.username),
            "user": { "username": user.username, "email": user.email },
        })),
    )
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<Arc<SimState>>,
    Json(request): Json<RegisterRequest>,
) -> (StatusCode, Json<Value>) {
    let (Some(username), Some(email), Some(password)) =
        (request.username, request.email, request.password)
    else {
        return error_response(StatusCode::BAD_REQUEST, "Missing required fields");
    };

    let username_taken = state.users.get(&username).await.is_some();
    let email_taken = state
        .users
        .list()
        .await
        .into_iter()
        .any(|(_, user)| user.email == email);
    if username_taken || email_taken {
        return error_response(StatusCode::CONFLICT, "User already exists");
    }

    state
        .users
        .put(
            &username,
            UserRecord {
                username: username.clone(),
                email: email.clone(),
                password,
            },
        )
        .await;

    tracing::info!("[Auth] Registered {}", username);
    (
        StatusCode::OK,
        Json(json!({
            "message": "User created successfully",
            "token": issue_token(&username),
            "user": { "username": username, "email": email },
        })),
    )
}
