//! Network-coupled document registry service.
//!
//! Wraps the pure registry state with the backend round trips that feed it.
//! State is only mutated after a round trip completes successfully; nothing
//! here is optimistic.

use docchat_backend::BackendClient;
use docchat_core::registry::DocumentRegistry;
use docchat_core::{DocchatError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps one user's document registry in sync with the backend.
#[derive(Clone)]
pub struct RegistryService {
    registry: Arc<RwLock<DocumentRegistry>>,
    backend: Arc<dyn BackendClient>,
    username: String,
}

impl RegistryService {
    pub fn new(backend: Arc<dyn BackendClient>, username: impl Into<String>) -> Self {
        Self {
            registry: Arc::new(RwLock::new(DocumentRegistry::new())),
            backend,
            username: username.into(),
        }
    }

    /// Known document names in listing order.
    pub async fn known(&self) -> Vec<String> {
        self.registry.read().await.known().to_vec()
    }

    /// The selected subset.
    pub async fn selected(&self) -> HashSet<String> {
        self.registry.read().await.selected().clone()
    }

    /// Selected names in listing order, the shape the ask request carries.
    pub async fn selected_in_order(&self) -> Vec<String> {
        self.registry.read().await.selected_in_order()
    }

    /// Flips the selection of a known document.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown name.
    pub async fn toggle(&self, name: &str) -> Result<()> {
        self.registry.write().await.toggle(name)
    }

    /// Replaces the registry with the backend's current listing.
    ///
    /// One GET round trip; on success the selection resets to the full new
    /// listing so newly uploaded documents are immediately queryable.
    pub async fn refresh(&self) -> Result<()> {
        let names = self.backend.list(&self.username).await?;
        tracing::debug!(
            "[Registry] Refreshed listing for {}: {} document(s)",
            self.username,
            names.len()
        );
        self.registry.write().await.install(names);
        Ok(())
    }

    /// Deletes a document on the backend, then locally.
    ///
    /// # Errors
    ///
    /// Propagates the backend failure; in that case both the known and
    /// selected sets are left exactly as they were.
    pub async fn remove(&self, name: &str) -> Result<()> {
        self.backend.delete(name, &self.username).await?;
        self.registry.write().await.remove_local(name);
        tracing::info!("[Registry] Removed {} for {}", name, self.username);
        Ok(())
    }

    /// Uploads a PDF and refreshes the listing on success.
    ///
    /// # Errors
    ///
    /// Rejects non-PDF filenames before any network call; otherwise
    /// propagates upload or refresh failures.
    ///
    /// # Returns
    ///
    /// The filename the backend stored the document under.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        if !file_name.to_ascii_lowercase().ends_with(".pdf") {
            return Err(DocchatError::invalid_input(
                "only PDF files are supported",
            ));
        }
        let stored = self.backend.upload(file_name, bytes, &self.username).await?;
        self.refresh().await?;
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use docchat_backend::HistoryEntry;
    use tokio::sync::Mutex;

    /// Backend fake with a scriptable document inventory.
    struct FakeBackend {
        pdfs: Mutex<Vec<String>>,
        fail_delete: bool,
        fail_upload: bool,
    }

    impl FakeBackend {
        fn with_pdfs(pdfs: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                pdfs: Mutex::new(pdfs.iter().map(|p| p.to_string()).collect()),
                fail_delete: false,
                fail_upload: false,
            })
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
            if self.fail_delete {
                return Err(DocchatError::backend_status(500, "delete rejected"));
            }
            self.pdfs.lock().await.retain(|p| p != filename);
            Ok(())
        }
        async fn list(&self, _: &str) -> Result<Vec<String>> {
            Ok(self.pdfs.lock().await.clone())
        }
        async fn history(&self, _: &str) -> Result<Vec<HistoryEntry>> {
            Ok(Vec::new())
        }
        async fn ask(&self, _: &[String], _: &str, _: &str) -> Result<String> {
            unimplemented!("not used by registry tests")
        }
    }

    #[tokio::test]
    async fn test_refresh_selects_full_listing() {
        let backend = FakeBackend::with_pdfs(&["a.pdf", "b.pdf"]);
        let service = RegistryService::new(backend, "demo");

        service.refresh().await.unwrap();

        assert_eq!(service.known().await, ["a.pdf", "b.pdf"]);
        assert_eq!(service.selected_in_order().await, ["a.pdf", "b.pdf"]);
    }

    #[tokio::test]
    async fn test_remove_success_updates_both_sets() {
        let backend = FakeBackend::with_pdfs(&["a.pdf", "b.pdf"]);
        let service = RegistryService::new(backend, "demo");
        service.refresh().await.unwrap();

        service.remove("a.pdf").await.unwrap();

        assert_eq!(service.known().await, ["b.pdf"]);
        assert!(!service.selected().await.contains("a.pdf"));
    }

    #[tokio::test]
    async fn test_remove_failure_leaves_sets_unchanged() {
        let backend = Arc::new(FakeBackend {
            pdfs: Mutex::new(vec!["a.pdf".to_string(), "b.pdf".to_string()]),
            fail_delete: true,
            fail_upload: false,
        });
        let service = RegistryService::new(backend, "demo");
        service.refresh().await.unwrap();

        let before_known = service.known().await;
        let before_selected = service.selected().await;

        let err = service.remove("a.pdf").await.unwrap_err();
        assert!(matches!(err, DocchatError::Backend { .. }));

        assert_eq!(service.known().await, before_known);
        assert_eq!(service.selected().await, before_selected);
    }

    #[tokio::test]
    async fn test_upload_triggers_refresh() {
        let backend = FakeBackend::with_pdfs(&["a.pdf"]);
        let service = RegistryService::new(backend, "demo");
        service.refresh().await.unwrap();
        service.toggle("a.pdf").await.unwrap();

        let stored = service.upload("b.pdf", vec![0x25, 0x50, 0x44, 0x46]).await.unwrap();
        assert_eq!(stored, "b.pdf");

        // Refresh re-selects everything, including the earlier deselection.
        assert_eq!(service.selected_in_order().await, ["a.pdf", "b.pdf"]);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf_before_network() {
        let backend = FakeBackend::with_pdfs(&["a.pdf"]);
        let service = RegistryService::new(backend.clone(), "demo");
        service.refresh().await.unwrap();

        let err = service.upload("notes.txt", vec![1, 2, 3]).await.unwrap_err();
        assert!(matches!(err, DocchatError::InvalidInput(_)));
        assert_eq!(backend.pdfs.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_pair_is_idempotent() {
        let backend = FakeBackend::with_pdfs(&["a.pdf", "b.pdf"]);
        let service = RegistryService::new(backend, "demo");
        service.refresh().await.unwrap();

        let before = service.selected().await;
        service.toggle("b.pdf").await.unwrap();
        service.toggle("b.pdf").await.unwrap();
        assert_eq!(service.selected().await, before);
    }
}
