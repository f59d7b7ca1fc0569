//! Use-case layer wiring the session core to the backend.
//!
//! This crate owns the orchestration the UI calls into: dispatching
//! questions into transcript slots, keeping the document registry in sync
//! with the backend, and hydrating a fresh session at login.

pub mod dispatcher;
pub mod event;
pub mod registry;
pub mod session;

pub use dispatcher::{ANSWER_ERROR_TEXT, QueryDispatcher};
pub use event::{EventSender, NoticeLevel, SessionEvent};
pub use registry::RegistryService;
pub use session::ChatSession;
