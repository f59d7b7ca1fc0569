//! Wire types for the backend protocol.

use serde::{Deserialize, Serialize};

/// One stored question/answer pair as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: String,
    pub answer: String,
    /// The document the question was asked against, when one was recorded.
    #[serde(default)]
    pub filename: Option<String>,
    /// ISO 8601 timestamp assigned by the backend.
    pub timestamp: String,
}

/// Response body of the upload endpoint.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
}

/// Response body of the document listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub pdfs: Vec<String>,
}

/// Response body of the history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

/// Response body of the ask endpoint.
#[derive(Debug, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_entry_without_filename() {
        let entry: HistoryEntry = serde_json::from_str(
            r#"{"question":"Q","answer":"A","timestamp":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(entry.filename, None);
    }

    #[test]
    fn test_list_response() {
        let list: ListResponse = serde_json::from_str(r#"{"pdfs":["a.pdf","b.pdf"]}"#).unwrap();
        assert_eq!(list.pdfs, ["a.pdf", "b.pdf"]);
    }
}
