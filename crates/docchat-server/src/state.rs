//! Shared in-memory state for the simulation endpoints.
//!
//! Every route sees the same store instances; there is exactly one user
//! store, one chat store, and one file store for the whole process.

use docchat_core::storage::{MemoryStorage, Storage};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A registered demo user. Plaintext password, simulation only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// One stored question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub question: String,
    pub answer: String,
    pub filename: Option<String>,
    pub timestamp: String,
}

/// An uploaded document. The "content" is a canned placeholder; no PDF is
/// actually parsed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub filename: String,
    pub content: String,
    pub uploaded_at: String,
}

/// Process-wide simulation state.
pub struct SimState {
    /// Users keyed by username.
    pub users: MemoryStorage<UserRecord>,
    /// Chat histories keyed by username.
    pub chats: MemoryStorage<Vec<ChatRecord>>,
    /// Uploaded files keyed by `username_filename`.
    pub files: MemoryStorage<FileRecord>,
    /// Simulated inference latency for the ask endpoint.
    pub answer_delay: Duration,
}

impl SimState {
    /// Creates the state with the seeded demo account.
    pub async fn new(answer_delay: Duration) -> Self {
        let state = Self {
            users: MemoryStorage::new(),
            chats: MemoryStorage::new(),
            files: MemoryStorage::new(),
            answer_delay,
        };
        state
            .users
            .put(
                "demo",
                UserRecord {
                    username: "demo".to_string(),
                    email: "demo@example.com".to_string(),
                    password: "password".to_string(),
                },
            )
            .await;
        state
    }
}
