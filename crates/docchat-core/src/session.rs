//! Session domain model and lifecycle.
//!
//! A session identifies the signed-in user and gates which operations are
//! legal. The lifecycle is `Unauthenticated -> Bootstrapping -> Ready ->
//! (logout) -> Unauthenticated`; queries, selection changes, uploads and
//! deletions are only legal in `Ready`.

use crate::error::{DocchatError, Result};
use serde::{Deserialize, Serialize};

/// The authenticated identity held for the session's lifetime.
///
/// The token is opaque client-side state issued at login/registration and
/// cleared on logout; no server-side session object exists in this demo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub token: String,
}

impl Identity {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No identity; the caller must redirect to authentication.
    Unauthenticated,
    /// Identity present, hydration from the backend in progress.
    Bootstrapping,
    /// Fully hydrated; all operations are legal.
    Ready,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Unauthenticated => "unauthenticated",
            SessionState::Bootstrapping => "bootstrapping",
            SessionState::Ready => "ready",
        }
    }
}

/// Two-phase document ingestion state.
///
/// Replaces the source UI's single "uploaded" boolean so the intermediate
/// phase is observable: an upload is `Pending` from the moment the request
/// leaves until the backend confirms or fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadState {
    /// No upload attempted yet this session.
    #[default]
    Idle,
    /// Upload request in flight.
    Pending,
    /// The backend accepted at least one document.
    Confirmed,
    /// The last upload attempt failed.
    Failed,
}

/// The current user's session.
///
/// Owns the lifecycle state and the ingestion state; the transcript and
/// document registry it governs live alongside it in the application layer
/// and are recreated on each login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    identity: Option<Identity>,
    state: SessionState,
    upload: UploadState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates an unauthenticated session.
    pub fn new() -> Self {
        Self {
            identity: None,
            state: SessionState::Unauthenticated,
            upload: UploadState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn upload(&self) -> UploadState {
        self.upload
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Accepts a login and moves to `Bootstrapping`.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` for a blank username and `State` when a
    /// session is already established.
    pub fn login(&mut self, identity: Identity) -> Result<()> {
        if identity.username.trim().is_empty() {
            return Err(DocchatError::Unauthenticated(
                "login requires a username".to_string(),
            ));
        }
        if self.state != SessionState::Unauthenticated {
            return Err(DocchatError::state("unauthenticated", self.state.as_str()));
        }
        self.identity = Some(identity);
        self.state = SessionState::Bootstrapping;
        Ok(())
    }

    /// Completes hydration and moves to `Ready`.
    pub fn mark_ready(&mut self) -> Result<()> {
        if self.state != SessionState::Bootstrapping {
            return Err(DocchatError::state("bootstrapping", self.state.as_str()));
        }
        self.state = SessionState::Ready;
        Ok(())
    }

    /// Clears the identity and returns to `Unauthenticated`.
    pub fn logout(&mut self) {
        self.identity = None;
        self.state = SessionState::Unauthenticated;
        self.upload = UploadState::Idle;
    }

    /// Returns the identity if the session is `Ready`.
    ///
    /// # Errors
    ///
    /// Returns `State` otherwise; callers use this to guard every
    /// user-facing operation.
    pub fn ensure_ready(&self) -> Result<&Identity> {
        if self.state != SessionState::Ready {
            return Err(DocchatError::state("ready", self.state.as_str()));
        }
        self.identity
            .as_ref()
            .ok_or_else(|| DocchatError::internal("ready session without identity"))
    }

    /// Marks an upload request as in flight.
    pub fn begin_upload(&mut self) {
        self.upload = UploadState::Pending;
    }

    /// Marks the in-flight upload as confirmed by the backend.
    pub fn confirm_upload(&mut self) {
        self.upload = UploadState::Confirmed;
    }

    /// Marks the in-flight upload as failed.
    pub fn fail_upload(&mut self) {
        self.upload = UploadState::Failed;
    }
}
