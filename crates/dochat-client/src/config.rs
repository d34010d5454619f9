//! Client configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the dochat client.
///
/// Nothing is persisted; defaults match the reference deployment and the
/// CLI can override both fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base address of the question-answering backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. A request that exceeds this resolves as
    /// a transport error instead of leaving the operation pending forever.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
