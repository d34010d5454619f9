//! Session state for one conversation.
//!
//! The session is an explicitly owned container: the transcript, the
//! uncommitted draft, the currently selected file, and one status value per
//! operation class (upload, query). It performs no I/O of its own; the
//! conversation layer drives the transitions.

use crate::message::Message;
use serde::{Deserialize, Serialize};

/// Supported document kinds, classified from the MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// `application/pdf`
    Pdf,
    /// `text/plain`
    Text,
    /// `text/csv`
    Csv,
}

impl FileKind {
    /// Classify a MIME type. Returns `None` for anything the backend
    /// cannot ingest.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        match mime_type {
            "application/pdf" => Some(Self::Pdf),
            "text/plain" => Some(Self::Text),
            "text/csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// The file the user has picked for upload. At most one exists at a time;
/// picking a new file replaces it wholesale.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    /// File name as presented to the backend.
    pub name: String,
    /// MIME type of the payload.
    pub mime_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Create a new selected file.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Classify this file, if the backend supports it.
    pub fn kind(&self) -> Option<FileKind> {
        FileKind::from_mime(&self.mime_type)
    }
}

/// Status of one operation class.
///
/// `Pending` spans the whole request, including the internal empty-answer
/// retry for queries; while pending, new submissions of the same class are
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpStatus {
    /// Nothing has been submitted yet.
    #[default]
    Idle,
    /// A request is in flight.
    Pending,
    /// The last request resolved successfully.
    Succeeded,
    /// The last request failed.
    Failed,
}

impl OpStatus {
    /// Whether a request is currently in flight.
    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }
}

/// State for one UI session. No persistence; dropped at process end.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Transcript in insertion order (also chronological and render order).
    messages: Vec<Message>,
    /// Current uncommitted input.
    pub draft: String,
    /// File picked for the next upload, if any.
    pub selected_file: Option<SelectedFile>,
    /// Kind of the most recently ingested file; drives query routing.
    pub last_ingested: Option<FileKind>,
    /// Upload status. Uploads are not gated against each other or against
    /// queries; the UI disables the attach control instead.
    pub upload: OpStatus,
    /// Query status. Gates query submission: at most one in flight.
    pub query: OpStatus,
}

impl SessionState {
    /// Create a new empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the transcript.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Replace the selected file.
    pub fn select_file(&mut self, file: SelectedFile) {
        self.selected_file = Some(file);
    }

    /// Accept or reject a query submission.
    ///
    /// Rejects (returning `None`) when the trimmed text is empty or a query
    /// is already pending. On acceptance the user message is appended
    /// immediately, the draft is cleared, and the query status moves to
    /// `Pending`; the accepted trimmed text is returned for dispatch.
    pub fn begin_query(&mut self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.query.is_pending() {
            return None;
        }

        self.messages.push(Message::user(trimmed));
        self.draft.clear();
        self.query = OpStatus::Pending;
        Some(trimmed.to_string())
    }

    /// Record a resolved answer: appends the bot message and releases the
    /// query gate.
    pub fn finish_query(&mut self, answer: impl Into<String>) {
        self.messages.push(Message::bot(answer));
        self.query = OpStatus::Succeeded;
    }

    /// Record a failed query. No bot message is appended.
    pub fn fail_query(&mut self) {
        self.query = OpStatus::Failed;
    }

    /// Mark an upload as started.
    pub fn begin_upload(&mut self) {
        self.upload = OpStatus::Pending;
    }

    /// Record a successful ingestion. Future queries route on `kind`.
    pub fn finish_upload(&mut self, kind: FileKind) {
        self.last_ingested = Some(kind);
        self.upload = OpStatus::Succeeded;
    }

    /// Record a failed upload. Routing is left unchanged.
    pub fn fail_upload(&mut self) {
        self.upload = OpStatus::Failed;
    }
}
