//! Exchange types for the transcript.

use serde::{Deserialize, Serialize};

/// The answer side of an exchange.
///
/// An answer is `Pending` from the moment its question is appended until the
/// backend response (or an error marker) is written into its slot. It moves
/// from pending to resolved exactly once in normal operation; a repeated
/// resolution overwrites (last write wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "text", rename_all = "snake_case")]
pub enum Answer {
    /// The question is in flight; the UI renders a placeholder.
    Pending,
    /// The answer text, or an error-marker text on failure.
    Resolved(String),
}

impl Answer {
    /// Returns true while the exchange is still waiting for its answer.
    pub fn is_pending(&self) -> bool {
        matches!(self, Answer::Pending)
    }

    /// Returns the resolved text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Answer::Pending => None,
            Answer::Resolved(text) => Some(text),
        }
    }
}

/// One question/answer pair in a transcript.
///
/// The question is immutable once created. Identity is positional: an
/// exchange's index in the transcript never changes after append, and
/// exchanges are never removed individually (only a whole-transcript clear).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// The user's question, immutable once created.
    pub question: String,
    /// The answer, pending until resolution.
    pub answer: Answer,
    /// Document context at dispatch time, when a single document was active.
    pub document: Option<String>,
    /// Timestamp when the exchange was created (ISO 8601 format).
    pub timestamp: String,
}

impl Exchange {
    /// Creates a pending exchange for a just-submitted question.
    pub fn pending(question: impl Into<String>, document: Option<String>) -> Self {
        Self {
            question: question.into(),
            answer: Answer::Pending,
            document,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates an already-resolved exchange, used when hydrating history.
    pub fn resolved(
        question: impl Into<String>,
        answer: impl Into<String>,
        document: Option<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: Answer::Resolved(answer.into()),
            document,
            timestamp: timestamp.into(),
        }
    }
}
