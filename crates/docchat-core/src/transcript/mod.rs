//! Transcript domain module.
//!
//! A transcript is the ordered sequence of question/answer exchanges for one
//! session. Exchanges are identified by position: a question reserves its slot
//! at submission time and the answer lands in that same slot whenever it
//! arrives, so concurrent submissions resolve independently without
//! disturbing each other's ordering.
//!
//! # Module Structure
//!
//! - `model`: Exchange and answer types (`Exchange`, `Answer`)
//! - `store`: Shared transcript store with generation-guarded resolution
//!   (`TranscriptStore`, `Slot`)

mod model;
mod store;

// Re-export public API
pub use model::{Answer, Exchange};
pub use store::{Slot, TranscriptStore};
