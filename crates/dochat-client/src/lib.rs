//! dochat-client: Headless client for a document question-answering backend
//!
//! This crate provides everything below the terminal UI, including:
//! - The message/transcript data model
//! - Session state with per-operation status gating
//! - The backend HTTP client (ingestion and question routes)
//! - The conversation contract (optimistic append, routing, empty-answer retry)

pub mod backend;
pub mod config;
pub mod conversation;
pub mod message;
pub mod session;

// Re-export commonly used types
pub use backend::{Answer, BackendClient, BackendError};
pub use config::Config;
pub use conversation::{ConversationClient, QueryOutcome, UploadError, FALLBACK_ANSWER};
pub use message::{Message, Sender};
pub use session::{FileKind, OpStatus, SelectedFile, SessionState};

/// Returns the client version.
pub fn client_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
