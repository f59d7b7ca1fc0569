//! Upload fixture.
//!
//! Accepts a multipart form with a `file` part and a `username` field,
//! PDF only. No content is extracted; a canned placeholder is stored.

use crate::routes::error_response;
use crate::state::{FileRecord, SimState};
use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use docchat_core::storage::Storage;
use serde_json::{Value, json};
use std::sync::Arc;

const SIMULATED_CONTENT: &str = "Simulated PDF content extraction for demo purposes...";

struct UploadedPart {
    filename: String,
    content_type: Option<String>,
}

/// Validates the parts and records the file in the shared store.
async fn accept_upload(
    state: &SimState,
    file: Option<UploadedPart>,
    username: Option<String>,
) -> (StatusCode, Json<Value>) {
    let (Some(file), Some(username)) = (file, username) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing file or username");
    };
    if file.content_type.as_deref() != Some("application/pdf") {
        return error_response(StatusCode::BAD_REQUEST, "Only PDF files are allowed");
    }

    let key = format!("{username}_{}", file.filename);
    state
        .files
        .put(
            &key,
            FileRecord {
                filename: file.filename.clone(),
                content: SIMULATED_CONTENT.to_string(),
                uploaded_at: chrono::Utc::now().to_rfc3339(),
            },
        )
        .await;

    tracing::info!("[Upload] Stored {} for {}", file.filename, username);
    (
        StatusCode::OK,
        Json(json!({
            "message": "File uploaded successfully",
            "filename": file.filename,
        })),
    )
}

/// `POST /api/upload`
pub async fn upload(
    State(state): State<Arc<SimState>>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut file: Option<UploadedPart> = None;
    let mut username: Option<String> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().map(str::to_string);
                match name.as_deref() {
                    Some("file") => {
                        let filename = field.file_name().map(str::to_string);
                        let content_type = field.content_type().map(str::to_string);
                        // The body is drained but never parsed.
                        if field.bytes().await.is_err() {
                            return error_response(StatusCode::BAD_REQUEST, "Malformed upload");
                        }
                        if let Some(filename) = filename {
                            file = Some(UploadedPart {
                                filename,
                                content_type,
                            });
                        }
                    }
                    Some("username") => match field.text().await {
                        Ok(text) => username = Some(text),
                        Err(_) => {
                            return error_response(StatusCode::BAD_REQUEST, "Malformed upload");
                        }
                    },
                    _ => {
                        let _ = field.bytes().await;
                    }
                }
            }
            Ok(None) => break,
            Err(_) => return error_response(StatusCode::BAD_REQUEST, "Malformed upload"),
        }
    }

    accept_upload(&state, file, username).await
}
