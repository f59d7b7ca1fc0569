//! reqwest-backed implementation of the backend protocol.

use crate::client::BackendClient;
use crate::config::BackendConfig;
use crate::types::{AskResponse, HistoryEntry, HistoryResponse, ListResponse, UploadResponse};
use async_trait::async_trait;
use docchat_core::{DocchatError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

/// HTTP client for the external answering service.
///
/// Document uploads and questions go out as multipart forms, listings and
/// history as GET queries; every response body is JSON.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a client from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the underlying HTTP client cannot be built.
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DocchatError::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Creates a client from environment configuration.
    pub fn from_env() -> Result<Self> {
        Self::new(BackendConfig::from_env())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}/", self.base_url)
    }

    /// Maps a non-success status to a typed error, reading the body for the
    /// message when the backend provides one.
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "no response body".to_string());
        Err(DocchatError::backend_status(status.as_u16(), message))
    }
}

fn transport(err: reqwest::Error) -> DocchatError {
    DocchatError::transport(err.to_string())
}

fn decode(err: reqwest::Error) -> DocchatError {
    DocchatError::Serialization(err.to_string())
}

#[async_trait]
impl BackendClient for HttpBackend {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>, username: &str) -> Result<String> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|e| DocchatError::internal(format!("invalid upload part: {e}")))?;
        let form = Form::new()
            .part("file", part)
            .text("username", username.to_string());

        tracing::info!("[HttpBackend] Uploading {} for {}", file_name, username);
        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let body: UploadResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(decode)?;
        Ok(body.filename)
    }

    async fn delete(&self, filename: &str, username: &str) -> Result<()> {
        let form = Form::new()
            .text("filename", filename.to_string())
            .text("username", username.to_string());

        tracing::info!("[HttpBackend] Deleting {} for {}", filename, username);
        let response = self
            .client
            .post(self.endpoint("delete"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn list(&self, username: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.endpoint("list"))
            .query(&[("username", username)])
            .send()
            .await
            .map_err(transport)?;
        let body: ListResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(decode)?;
        Ok(body.pdfs)
    }

    async fn history(&self, username: &str) -> Result<Vec<HistoryEntry>> {
        let response = self
            .client
            .get(self.endpoint("history"))
            .query(&[("username", username)])
            .send()
            .await
            .map_err(transport)?;
        let body: HistoryResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(decode)?;
        Ok(body.history)
    }

    async fn ask(&self, filenames: &[String], query: &str, username: &str) -> Result<String> {
        let encoded = serde_json::to_string(filenames)
            .map_err(|e| DocchatError::Serialization(e.to_string()))?;
        let form = Form::new()
            .text("filenames", encoded)
            .text("query", query.to_string())
            .text("username", username.to_string());

        tracing::debug!(
            "[HttpBackend] Asking against {} document(s) for {}",
            filenames.len(),
            username
        );
        let response = self
            .client
            .post(self.endpoint("ask"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let body: AskResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(decode)?;
        Ok(body.answer)
    }
}
