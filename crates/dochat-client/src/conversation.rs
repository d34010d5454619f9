//! The conversation contract.
//!
//! This module ties the session state to the backend client: upload routing
//! by MIME type, query routing by upload history, the optimistic
//! append-then-resolve message flow, and the bounded empty-answer retry.

use crate::backend::{BackendClient, BackendError, QueryRoute};
use crate::config::Config;
use crate::session::{FileKind, SelectedFile, SessionState};
use tracing::{debug, warn};

/// Fixed answer substituted when the backend returns nothing usable twice
/// in a row.
pub const FALLBACK_ANSWER: &str = "I cannot answer this question.";

/// Errors from the upload flow.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The selected file's MIME type has no ingestion route. Detected
    /// before any network call.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// No file has been selected.
    #[error("no file selected")]
    NoFile,

    /// The backend exchange failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Result of an accepted or rejected query submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The submission was a no-op: blank input or a query already pending.
    /// Nothing was appended and no network call was made.
    Rejected,
    /// The query resolved; the answer was appended as a bot message.
    Answered(String),
}

/// Select the question route from upload history. Only a CSV ingestion
/// switches to the tabular route; PDF, plain text, and no upload at all use
/// the general route.
pub fn route_for(last_ingested: Option<FileKind>) -> QueryRoute {
    match last_ingested {
        Some(FileKind::Csv) => QueryRoute::Tabular,
        _ => QueryRoute::General,
    }
}

/// Resolve a query to answer text.
///
/// Empty answers get exactly one retry against the general route; a second
/// empty answer yields [`FALLBACK_ANSWER`]. Transport and server errors
/// propagate unchanged.
pub async fn resolve_answer(
    backend: &BackendClient,
    route: QueryRoute,
    query: &str,
) -> Result<String, BackendError> {
    let first = backend.ask(route, query).await?;
    if !first.is_blank() {
        return Ok(first.answer);
    }

    warn!(?route, "empty answer, retrying once on the general route");
    let retry = backend.ask(QueryRoute::General, query).await?;
    if retry.is_blank() {
        debug!("retry also empty, substituting fallback answer");
        Ok(FALLBACK_ANSWER.to_string())
    } else {
        Ok(retry.answer)
    }
}

/// A session plus the backend it talks to.
///
/// Queries are serialized by the session's query gate; the Nth query is not
/// issued until the (N-1)th has fully resolved, retry included. Uploads
/// carry no such gate (the UI disables the attach control instead).
#[derive(Debug)]
pub struct ConversationClient {
    session: SessionState,
    backend: BackendClient,
}

impl ConversationClient {
    /// Create a client for the configured backend.
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        Ok(Self::with_backend(BackendClient::new(config)?))
    }

    /// Create a client around an existing backend handle.
    pub fn with_backend(backend: BackendClient) -> Self {
        Self {
            session: SessionState::new(),
            backend,
        }
    }

    /// Session state, for rendering.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Mutable session state, for draft editing.
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// Backend handle.
    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    /// Replace the selected file.
    pub fn select_file(&mut self, file: SelectedFile) {
        self.session.select_file(file);
    }

    /// Upload the selected file to its ingestion route.
    ///
    /// An unsupported MIME type fails before any network call. Every path,
    /// including that one, releases the upload status. The transcript is
    /// never touched by uploads.
    pub async fn submit_upload(&mut self) -> Result<FileKind, UploadError> {
        let Some(file) = self.session.selected_file.clone() else {
            return Err(UploadError::NoFile);
        };

        self.session.begin_upload();

        let Some(kind) = file.kind() else {
            self.session.fail_upload();
            return Err(UploadError::UnsupportedFileType(file.mime_type));
        };

        match self.backend.ingest(kind, &file).await {
            Ok(()) => {
                self.session.finish_upload(kind);
                Ok(kind)
            }
            Err(e) => {
                self.session.fail_upload();
                Err(e.into())
            }
        }
    }

    /// Submit a query.
    ///
    /// Blank input or an already-pending query is rejected without side
    /// effects. Otherwise the user message is appended synchronously, the
    /// answer is resolved (with the empty-answer retry), and the bot
    /// message is appended. On error no bot message is appended and the
    /// query gate is released.
    pub async fn submit_query(&mut self, text: &str) -> Result<QueryOutcome, BackendError> {
        let Some(accepted) = self.session.begin_query(text) else {
            return Ok(QueryOutcome::Rejected);
        };

        let route = route_for(self.session.last_ingested);
        match resolve_answer(&self.backend, route, &accepted).await {
            Ok(answer) => {
                self.session.finish_query(answer.clone());
                Ok(QueryOutcome::Answered(answer))
            }
            Err(e) => {
                self.session.fail_query();
                Err(e)
            }
        }
    }
}
