//! HTTP client for the external question-answering backend.
//!
//! The backend owns everything algorithmically hard: document indexing,
//! retrieval, and inference. This crate only speaks its wire protocol
//! (multipart uploads and queries, JSON responses) and exposes a trait seam
//! so the application layer can be tested against an in-memory fake.

pub mod client;
pub mod config;
pub mod http;
pub mod types;

pub use client::BackendClient;
pub use config::BackendConfig;
pub use http::HttpBackend;
pub use types::HistoryEntry;
