pub mod error;
pub mod registry;
pub mod session;
pub mod storage;
pub mod transcript;

// Re-export common error type
pub use error::{DocchatError, Result};
