//! Query dispatcher: turns a typed question plus the active document
//! selection into one backend request and lands the result in the transcript
//! slot reserved at submission time.

use crate::event::{EventSender, NoticeLevel, notify};
use docchat_backend::BackendClient;
use docchat_core::transcript::{Slot, TranscriptStore};
use docchat_core::{DocchatError, Result};
use std::sync::Arc;

/// Answer text written into a slot when the backend request fails.
pub const ANSWER_ERROR_TEXT: &str = "Error fetching answer.";

/// Dispatches questions against the answering backend.
///
/// Each `submit` owns one transcript slot and resolves it independently;
/// callers may run any number of submissions concurrently (the UI simply
/// does not wait for question N before sending N+1), and no submission can
/// block or abort another.
#[derive(Clone)]
pub struct QueryDispatcher {
    backend: Arc<dyn BackendClient>,
    transcript: TranscriptStore,
    events: EventSender,
    username: String,
}

impl QueryDispatcher {
    pub fn new(
        backend: Arc<dyn BackendClient>,
        transcript: TranscriptStore,
        events: EventSender,
        username: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            transcript,
            events,
            username: username.into(),
        }
    }

    /// Submits one question against the selected documents.
    ///
    /// The pending exchange is appended before any network activity so the
    /// placeholder renders immediately. A backend failure is recovered
    /// locally: the slot gets [`ANSWER_ERROR_TEXT`] and an error notice goes
    /// out on the event channel, but the call still returns `Ok` and other
    /// in-flight submissions are untouched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` (before any state change) for an empty or
    /// whitespace-only question, or an empty document selection.
    pub async fn submit(&self, question: &str, selected: &[String]) -> Result<Slot> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DocchatError::invalid_input("question is empty"));
        }
        if selected.is_empty() {
            return Err(DocchatError::invalid_input("no documents selected"));
        }

        // Per-exchange document context is only meaningful when exactly one
        // document is active.
        let document = (selected.len() == 1).then(|| selected[0].clone());
        let slot = self.transcript.append(question, document).await;

        match self.backend.ask(selected, question, &self.username).await {
            Ok(answer) => {
                self.transcript.resolve(slot, answer).await;
            }
            Err(err) => {
                tracing::warn!(
                    "[Dispatcher] Ask failed for slot {}: {}",
                    slot.index(),
                    err
                );
                self.transcript.resolve(slot, ANSWER_ERROR_TEXT).await;
                notify(&self.events, NoticeLevel::Error, "Failed to get answer");
            }
        }
        Ok(slot)
    }
}
