//! Backend connection configuration.
//!
//! Reads overrides from the environment and falls back to the demo defaults.

use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the external answering service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Whole-request timeout, covering inference latency.
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl BackendConfig {
    /// Loads configuration from environment variables.
    ///
    /// `DOCCHAT_BACKEND_URL` overrides the base URL and
    /// `DOCCHAT_BACKEND_TIMEOUT_SECS` the timeout; anything unset or
    /// unparsable keeps its default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("DOCCHAT_BACKEND_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(secs) = env::var("DOCCHAT_BACKEND_TIMEOUT_SECS")
            && let Ok(secs) = secs.parse::<u64>()
        {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }

    /// Sets the base URL, trimming any trailing slash.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}
