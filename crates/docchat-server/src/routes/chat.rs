//! Ask, history, and clear fixtures.
//!
//! Answers come from a canned pool after a simulated inference delay; the
//! shared chat store keeps per-user history so the history endpoint and the
//! ask endpoint observe the same data.

use crate::routes::error_response;
use crate::state::{ChatRecord, SimState};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use docchat_core::storage::Storage;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Canned responses standing in for the real RAG pipeline.
const SIMULATED_ANSWERS: &[&str] = &[
    "Based on the document analysis, this information relates to the strategic planning section where the company outlines its growth objectives and market positioning strategies for the upcoming fiscal year.",
    "According to the document, this data point is referenced in the financial projections section, specifically highlighting the expected ROI and budget allocations for various departments.",
    "The document indicates that this topic is covered extensively in the operational efficiency chapter, detailing process improvements and resource optimization strategies.",
    "This question pertains to the risk assessment section of the document, where potential challenges and mitigation strategies are thoroughly analyzed.",
    "The document addresses this in the market analysis section, providing insights into competitive landscape and customer behavior patterns.",
    "Based on the PDF content, this relates to the executive summary where key performance indicators and strategic milestones are outlined for stakeholder review.",
];

const HISTORY_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClearRequest {
    #[serde(default)]
    pub username: Option<String>,
}

/// Builds the simulated answer, prefixed with document context when one was
/// provided.
fn simulated_answer(filename: Option<&str>) -> String {
    let base = SIMULATED_ANSWERS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(SIMULATED_ANSWERS[0]);
    match filename {
        Some(filename) => format!(
            "📄 **Based on \"{filename}\":**\n\n{base}\n\n*Note: This is a simulated response. In production, this would analyze your actual PDF content using AI.*"
        ),
        None => format!(
            "🤖 **AI Response:**\n\n{base}\n\n*💡 Tip: Upload a PDF document for more specific answers based on your content.*"
        ),
    }
}

/// `POST /api/chat/ask`
pub async fn ask(
    State(state): State<Arc<SimState>>,
    Json(request): Json<AskRequest>,
) -> (StatusCode, Json<Value>) {
    let (Some(query), Some(username)) = (request.query, request.username) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing query or username");
    };

    // Simulated inference latency.
    tokio::time::sleep(state.answer_delay).await;

    let answer = simulated_answer(request.filename.as_deref());
    let timestamp = chrono::Utc::now().to_rfc3339();
    let record = ChatRecord {
        question: query,
        answer: answer.clone(),
        filename: request.filename,
        timestamp: timestamp.clone(),
    };
    state
        .chats
        .update(&username, move |history| history.push(record))
        .await;

    tracing::debug!("[Chat] Answered question for {}", username);
    (
        StatusCode::OK,
        Json(json!({ "answer": answer, "timestamp": timestamp })),
    )
}

/// `GET /api/chat/history?username=`
pub async fn history(
    State(state): State<Arc<SimState>>,
    Query(params): Query<HistoryParams>,
) -> (StatusCode, Json<Value>) {
    let Some(username) = params.username else {
        return error_response(StatusCode::BAD_REQUEST, "Missing username");
    };

    let history = state.chats.get(&username).await.unwrap_or_default();
    // Oldest first for proper chat order, capped to the most recent entries.
    let start = history.len().saturating_sub(HISTORY_LIMIT);
    let entries: Vec<Value> = history[start..]
        .iter()
        .map(|record| {
            json!({
                "question": record.question,
                "answer": record.answer,
                "filename": record.filename,
                "timestamp": record.timestamp,
            })
        })
        .collect();

    (StatusCode::OK, Json(json!({ "history": entries })))
}

/// `POST /api/chat/clear`
pub async fn clear(
    State(state): State<Arc<SimState>>,
    Json(request): Json<ClearRequest>,
) -> (StatusCode, Json<Value>) {
    let Some(username) = request.username else {
        return error_response(StatusCode::BAD_REQUEST, "Missing username");
    };

    state.chats.put(&username, Vec::new()).await;
    (
        StatusCode::OK,
        Json(json!({ "message": "Chat history cleared successfully" })),
    )
}
