//! Chat session aggregate and bootstrap.
//!
//! `ChatSession` owns one transcript and one document registry, both hydrated
//! from the backend when the session is established. All user-facing
//! operations are guarded by the session lifecycle: they are only legal once
//! hydration has finished and until logout.

use crate::dispatcher::QueryDispatcher;
use crate::event::{EventSender, NoticeLevel, notify};
use crate::registry::RegistryService;
use docchat_backend::BackendClient;
use docchat_core::session::{Identity, Session, SessionState, UploadState};
use docchat_core::transcript::{Exchange, Slot, TranscriptStore};
use docchat_core::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

/// One signed-in user's chat session.
pub struct ChatSession {
    session: RwLock<Session>,
    transcript: TranscriptStore,
    registry: RegistryService,
    dispatcher: QueryDispatcher,
    events: EventSender,
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession").finish_non_exhaustive()
    }
}

impl ChatSession {
    /// Establishes a session: authenticates the identity, hydrates the
    /// transcript and document registry from the backend, and moves the
    /// session to `Ready`.
    ///
    /// History entries are installed oldest-first regardless of the order
    /// the backend returns them in.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` when no usable identity is present (the
    /// caller redirects to authentication), or propagates hydration
    /// failures.
    pub async fn bootstrap(
        identity: Identity,
        backend: Arc<dyn BackendClient>,
        events: EventSender,
    ) -> Result<Arc<Self>> {
        let username = identity.username.clone();
        let mut session = Session::new();
        session.login(identity)?;

        tracing::info!("[Session] Bootstrapping session for {}", username);

        let transcript = TranscriptStore::new();
        let mut history = backend.history(&username).await?;
        history.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        transcript
            .install(
                history
                    .into_iter()
                    .map(|entry| {
                        Exchange::resolved(
                            entry.question,
                            entry.answer,
                            entry.filename,
                            entry.timestamp,
                        )
                    })
                    .collect(),
            )
            .await;

        let registry = RegistryService::new(backend.clone(), username.clone());
        registry.refresh().await?;

        session.mark_ready()?;
        tracing::info!(
            "[Session] Session ready for {}: {} exchange(s), {} document(s)",
            username,
            transcript.len().await,
            registry.known().await.len()
        );

        let dispatcher =
            QueryDispatcher::new(backend, transcript.clone(), events.clone(), username);

        Ok(Arc::new(Self {
            session: RwLock::new(session),
            transcript,
            registry,
            dispatcher,
            events,
        }))
    }

    /// The session's transcript store.
    pub fn transcript(&self) -> &TranscriptStore {
        &self.transcript
    }

    /// The session's document registry service.
    pub fn registry(&self) -> &RegistryService {
        &self.registry
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> SessionState {
        self.session.read().await.state()
    }

    /// Current document ingestion state.
    pub async fn upload_state(&self) -> UploadState {
        self.session.read().await.upload()
    }

    async fn ensure_ready(&self) -> Result<()> {
        self.session.read().await.ensure_ready().map(|_| ())
    }

    /// Submits a question against the currently selected documents.
    ///
    /// See [`QueryDispatcher::submit`] for validation and failure recovery.
    pub async fn submit(&self, question: &str) -> Result<Slot> {
        self.ensure_ready().await?;
        let selected = self.registry.selected_in_order().await;
        self.dispatcher.submit(question, &selected).await
    }

    /// Flips the selection of a known document.
    pub async fn toggle(&self, name: &str) -> Result<()> {
        self.ensure_ready().await?;
        self.registry.toggle(name).await
    }

    /// Deletes a document on the backend and locally on confirmation.
    pub async fn remove(&self, name: &str) -> Result<()> {
        self.ensure_ready().await?;
        self.registry.remove(name).await
    }

    /// Uploads a PDF, driving the two-phase ingestion state.
    ///
    /// # Returns
    ///
    /// The filename the backend stored the document under.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        self.ensure_ready().await?;
        if !file_name.to_ascii_lowercase().ends_with(".pdf") {
            // Client-side rejection; the ingestion state is untouched.
            return Err(docchat_core::DocchatError::invalid_input(
                "only PDF files are supported",
            ));
        }
        self.session.write().await.begin_upload();

        match self.registry.upload(file_name, bytes).await {
            Ok(stored) => {
                self.session.write().await.confirm_upload();
                notify(&self.events, NoticeLevel::Info, "PDF uploaded successfully!");
                Ok(stored)
            }
            Err(err) => {
                self.session.write().await.fail_upload();
                notify(&self.events, NoticeLevel::Error, "Failed to upload PDF");
                Err(err)
            }
        }
    }

    /// Empties the transcript. Local only; the stored history on the backend
    /// is untouched, matching the source UI's clear action.
    pub async fn clear(&self) -> Result<()> {
        self.ensure_ready().await?;
        self.transcript.clear().await;
        Ok(())
    }

    /// Ends the session: clears the identity and local state.
    ///
    /// In-flight submissions keep running but their resolutions are
    /// discarded by the transcript's generation guard.
    pub async fn logout(&self) {
        self.session.write().await.logout();
        self.transcript.clear().await;
        tracing::info!("[Session] Logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event;
    use async_trait::async_trait;
    use docchat_backend::HistoryEntry;
    use docchat_core::DocchatError;
    use tokio::sync::Mutex;

    struct FakeBackend {
        history: Vec<HistoryEntry>,
        pdfs: Mutex<Vec<String>>,
        fail_upload: bool,
    }

    impl FakeBackend {
        fn new(history: Vec<HistoryEntry>, pdfs: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                history,
                pdfs: Mutex::new(pdfs.iter().map(|p| p.to_string()).collect()),
                fail_upload: false,
            })
        }
    }

    fn entry(question: &str, timestamp: &str) -> HistoryEntry {
        HistoryEntry {
            question: question.to_string(),
            answer: format!("answer to {question}"),
            filename: None,
            timestamp: timestamp.to_string(),
        }
    }

    #[async_trait]
    impl BackendClient for FakeBackend {
        async fn upload(&self, file_name: &str, _: Vec<u8>, _: &str) -> Result<String> {
            if self.fail_upload {
                return Err(DocchatError::backend_status(500, "upload rejected"));
            }
            self.pdfs.lock().await.push(file_name.to_string());
            Ok(file_name.to_string())
        }
        async fn delete(&self, filename: &str, _: &str) -> Result<()> {
            self.pdfs.lock().await.retain(|p| p != filename);
            Ok(())
        }
        async fn list(&self, _: &str) -> Result<Vec<String>> {
            Ok(self.pdfs.lock().await.clone())
        }
        async fn history(&self, _: &str) -> Result<Vec<HistoryEntry>> {
            Ok(self.history.clone())
        }
        async fn ask(&self, filenames: &[String], query: &str, _: &str) -> Result<String> {
            Ok(format!("{} (from {})", query, filenames.join(", ")))
        }
    }

    fn demo_identity() -> Identity {
        Identity::new("demo", "dG9rZW4=")
    }

    #[tokio::test]
    async fn test_bootstrap_orders_history_oldest_first() {
        // Backend returns newest first; the session must reorder.
        let backend = FakeBackend::new(
            vec![
                entry("third", "2024-01-03T00:00:00Z"),
                entry("second", "2024-01-02T00:00:00Z"),
                entry("first", "2024-01-01T00:00:00Z"),
            ],
            &["a.pdf"],
        );
        let (events, _rx) = event::channel();

        let session = ChatSession::bootstrap(demo_identity(), backend, events)
            .await
            .unwrap();

        assert_eq!(session.state().await, SessionState::Ready);
        let entries = session.transcript().snapshot().await;
        let questions: Vec<_> = entries.iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_bootstrap_hydrates_registry_with_select_all() {
        let backend = FakeBackend::new(Vec::new(), &["a.pdf", "b.pdf"]);
        let (events, _rx) = event::channel();

        let session = ChatSession::bootstrap(demo_identity(), backend, events)
            .await
            .unwrap();

        assert_eq!(
            session.registry().selected_in_order().await,
            ["a.pdf", "b.pdf"]
        );
    }

    #[tokio::test]
    async fn test_bootstrap_requires_identity() {
        let backend = FakeBackend::new(Vec::new(), &[]);
        let (events, _rx) = event::channel();

        let err = ChatSession::bootstrap(Identity::new("", "token"), backend, events)
            .await
            .unwrap_err();
        assert!(matches!(err, DocchatError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn test_submit_uses_selected_documents() {
        let backend = FakeBackend::new(Vec::new(), &["a.pdf", "b.pdf"]);
        let (events, _rx) = event::channel();
        let session = ChatSession::bootstrap(demo_identity(), backend, events)
            .await
            .unwrap();

        session.toggle("b.pdf").await.unwrap();
        session.submit("What changed?").await.unwrap();

        let entries = session.transcript().snapshot().await;
        assert_eq!(
            entries[0].answer.text(),
            Some("What changed? (from a.pdf)")
        );
    }

    #[tokio::test]
    async fn test_operations_illegal_after_logout() {
        let backend = FakeBackend::new(Vec::new(), &["a.pdf"]);
        let (events, _rx) = event::channel();
        let session = ChatSession::bootstrap(demo_identity(), backend, events)
            .await
            .unwrap();

        session.logout().await;

        assert_eq!(session.state().await, SessionState::Unauthenticated);
        assert!(matches!(
            session.submit("Q").await.unwrap_err(),
            DocchatError::State { .. }
        ));
        assert!(matches!(
            session.toggle("a.pdf").await.unwrap_err(),
            DocchatError::State { .. }
        ));
    }

    #[tokio::test]
    async fn test_upload_two_phase_success() {
        let backend = FakeBackend::new(Vec::new(), &["a.pdf"]);
        let (events, mut rx) = event::channel();
        let session = ChatSession::bootstrap(demo_identity(), backend, events)
            .await
            .unwrap();

        assert_eq!(session.upload_state().await, UploadState::Idle);
        session.upload("b.pdf", vec![0x25]).await.unwrap();
        assert_eq!(session.upload_state().await, UploadState::Confirmed);

        // The fresh listing includes the new document, fully selected.
        assert_eq!(
            session.registry().selected_in_order().await,
            ["a.pdf", "b.pdf"]
        );

        let notice = rx.recv().await.unwrap();
        assert!(matches!(
            notice,
            crate::event::SessionEvent::Notice {
                level: NoticeLevel::Info,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_upload_two_phase_failure() {
        let backend = Arc::new(FakeBackend {
            history: Vec::new(),
            pdfs: Mutex::new(vec!["a.pdf".to_string()]),
            fail_upload: true,
        });
        let (events, _rx) = event::channel();
        let session = ChatSession::bootstrap(demo_identity(), backend, events)
            .await
            .unwrap();

        let err = session.upload("b.pdf", vec![0x25]).await.unwrap_err();
        assert!(matches!(err, DocchatError::Backend { .. }));
        assert_eq!(session.upload_state().await, UploadState::Failed);
        // Registry untouched by the failed upload.
        assert_eq!(session.registry().known().await, ["a.pdf"]);
    }

    #[tokio::test]
    async fn test_upload_non_pdf_rejected_without_state_change() {
        let backend = FakeBackend::new(Vec::new(), &["a.pdf"]);
        let (events, _rx) = event::channel();
        let session = ChatSession::bootstrap(demo_identity(), backend, events)
            .await
            .unwrap();

        let err = session.upload("notes.txt", vec![1, 2, 3]).await.unwrap_err();
        assert!(matches!(err, DocchatError::InvalidInput(_)));
        assert_eq!(session.upload_state().await, UploadState::Idle);
    }

    #[tokio::test]
    async fn test_clear_empties_transcript_locally() {
        let backend = FakeBackend::new(
            vec![entry("old", "2024-01-01T00:00:00Z")],
            &["a.pdf"],
        );
        let (events, _rx) = event::channel();
        let session = ChatSession::bootstrap(demo_identity(), backend, events)
            .await
            .unwrap();

        assert_eq!(session.transcript().len().await, 1);
        session.clear().await.unwrap();
        assert!(session.transcript().is_empty().await);
    }
}
