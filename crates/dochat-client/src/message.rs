//! Transcript message types.
//!
//! Messages are immutable once created and live in an append-only
//! transcript owned by the session.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the client.
    User,
    /// The question-answering backend.
    Bot,
}

/// A single message in the conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message content.
    pub text: String,
    /// Author of the message.
    pub sender: Sender,
    /// Timestamp captured at creation.
    pub timestamp: DateTime<Local>,
}

impl Message {
    /// Create a new user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            timestamp: Local::now(),
        }
    }

    /// Create a new bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            timestamp: Local::now(),
        }
    }

    /// Human-readable time of day for transcript rendering.
    pub fn time_of_day(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}
