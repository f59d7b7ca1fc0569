//! Session events published to the UI.
//!
//! Failures recovered inside the use-case layer still need to reach the user
//! as a transient notification; this channel is that path. Sending is
//! fire-and-forget: a missing receiver must never turn a recovered failure
//! back into a fault.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// High-level events published to the session's UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Non-blocking notification, the toast equivalent.
    Notice {
        level: NoticeLevel,
        message: String,
    },
}

/// Sending half of the session event channel.
pub type EventSender = mpsc::UnboundedSender<SessionEvent>;

/// Creates the session event channel.
pub fn channel() -> (EventSender, mpsc::UnboundedReceiver<SessionEvent>) {
    mpsc::unbounded_channel()
}

/// Publishes a notice, ignoring a closed channel.
pub fn notify(events: &EventSender, level: NoticeLevel, message: impl Into<String>) {
    let _ = events.send(SessionEvent::Notice {
        level,
        message: message.into(),
    });
}
