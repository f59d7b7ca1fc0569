//! Backend client trait.

use crate::types::HistoryEntry;
use async_trait::async_trait;
use docchat_core::Result;

/// An abstract client for the external answering service.
///
/// This trait decouples the application's session logic from the concrete
/// HTTP transport so tests can drive it with an in-memory fake, including
/// fakes that resolve out of order or fail on demand.
///
/// Every method performs exactly one round trip; callers never retry
/// implicitly and never mutate local state before the round trip completes.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Uploads a PDF for `username`.
    ///
    /// # Returns
    ///
    /// The filename the backend stored the document under.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>, username: &str) -> Result<String>;

    /// Deletes a stored document.
    async fn delete(&self, filename: &str, username: &str) -> Result<()>;

    /// Lists the stored document names for `username`.
    async fn list(&self, username: &str) -> Result<Vec<String>>;

    /// Fetches the stored chat history for `username`.
    ///
    /// Entries come back in whatever order the backend uses; chronological
    /// ordering is the caller's responsibility.
    async fn history(&self, username: &str) -> Result<Vec<HistoryEntry>>;

    /// Asks a question against the selected documents.
    ///
    /// # Returns
    ///
    /// The answer text.
    async fn ask(&self, filenames: &[String], query: &str, username: &str) -> Result<String>;
}
