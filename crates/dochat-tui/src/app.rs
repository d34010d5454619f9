//! Application state and update logic for the dochat TUI.

use crate::event::Action;
use crate::widgets::{PromptState, TranscriptState, SCROLL_SPEED};
use dochat_client::backend::QueryRoute;
use dochat_client::{
    conversation, BackendClient, BackendError, Config, FileKind, SessionState,
};
use std::path::{Path, PathBuf};

/// Transient user-facing notice (stands in for the reference UI's alerts).
#[derive(Debug, Clone)]
pub struct Notice {
    /// Message text.
    pub text: String,
    /// Whether to render it as a failure.
    pub is_error: bool,
}

/// Which prompt owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Typing a question.
    #[default]
    Compose,
    /// Typing a file path to attach.
    Attach,
}

/// A validated upload ready to be dispatched as a task.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Path to read the file from.
    pub path: PathBuf,
    /// File name presented to the backend.
    pub file_name: String,
    /// MIME type inferred from the extension.
    pub mime_type: String,
    /// Ingestion route kind.
    pub kind: FileKind,
}

/// Infer a MIME type from a path's extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        _ => "application/octet-stream",
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Which prompt owns the keyboard.
    pub mode: Mode,

    /// Conversation session state.
    pub session: SessionState,

    /// Backend handle, cloned into request tasks.
    backend: BackendClient,

    /// Question input.
    pub input: PromptState,

    /// File path input for the attach prompt.
    pub attach_input: PromptState,

    /// Transcript scroll/follow state.
    pub transcript: TranscriptState,

    /// Tick counter for animations.
    pub tick: usize,

    /// Current notice, if any.
    pub notice: Option<Notice>,

    /// Ticks remaining until the notice is cleared.
    notice_ttl: usize,

    /// Where `Ctrl+E` writes the transcript.
    pub export_path: PathBuf,
}

impl App {
    /// Create a new app instance for the configured backend.
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        Ok(Self {
            should_quit: false,
            show_help: false,
            mode: Mode::Compose,
            session: SessionState::new(),
            backend: BackendClient::new(config)?,
            input: PromptState::new(),
            attach_input: PromptState::new(),
            transcript: TranscriptState::new(),
            tick: 0,
            notice: None,
            notice_ttl: 0,
            export_path: PathBuf::from("dochat-transcript.md"),
        })
    }

    /// Backend handle for spawning request tasks.
    pub fn backend(&self) -> BackendClient {
        self.backend.clone()
    }

    /// Handle a non-text action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Help => {
                self.show_help = !self.show_help;
            }
            Action::Back => {
                if self.show_help {
                    self.show_help = false;
                } else if self.mode == Mode::Attach {
                    self.attach_input.clear();
                    self.mode = Mode::Compose;
                } else {
                    self.transcript.follow_bottom();
                }
            }
            Action::Attach => {
                if self.session.upload.is_pending() {
                    // Attach control is disabled while an upload is outstanding
                    self.set_error("Upload already in progress".to_string());
                } else {
                    self.mode = Mode::Attach;
                }
            }
            Action::Export => {
                self.export_transcript();
            }
            Action::ScrollUp => {
                self.transcript.scroll_up(SCROLL_SPEED);
            }
            Action::ScrollDown => {
                self.transcript.scroll_down(SCROLL_SPEED);
            }
            Action::FollowBottom => {
                self.transcript.follow_bottom();
            }
            Action::None => {}
        }
    }

    /// Set a temporary notice.
    pub fn set_notice(&mut self, text: String) {
        self.notice = Some(Notice {
            text,
            is_error: false,
        });
        // Display for ~3 seconds at 4 Hz tick rate (250ms) = 12 ticks
        self.notice_ttl = 12;
    }

    /// Set a temporary failure notice.
    pub fn set_error(&mut self, text: String) {
        self.notice = Some(Notice {
            text,
            is_error: true,
        });
        self.notice_ttl = 12;
    }

    /// Increment tick counter and update time-based state.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        // Clear notice after TTL expires
        if self.notice_ttl > 0 {
            self.notice_ttl -= 1;
            if self.notice_ttl == 0 {
                self.notice = None;
            }
        }
    }

    // === Query flow ===

    /// Accept the draft as a query submission.
    ///
    /// Returns the route and accepted text for the run loop to dispatch, or
    /// `None` when the submission is rejected (blank input or a query
    /// already pending). On acceptance the user message is already in the
    /// transcript and the query gate is held.
    pub fn begin_query(&mut self) -> Option<(QueryRoute, String)> {
        let draft = self.input.content().to_string();
        let accepted = self.session.begin_query(&draft)?;
        self.input.submit();
        self.transcript.follow_bottom();
        Some((
            conversation::route_for(self.session.last_ingested),
            accepted,
        ))
    }

    /// Record a resolved answer.
    pub fn query_resolved(&mut self, answer: String) {
        self.session.finish_query(answer);
        self.transcript.follow_bottom();
    }

    /// Record a failed query. No bot message is appended.
    pub fn query_failed(&mut self, err: &BackendError) {
        self.session.fail_query();
        self.set_error(format!("Error with query: {err}"));
    }

    // === Upload flow ===

    /// Accept the attach prompt as an upload submission.
    ///
    /// Unsupported file types fail here, before any network call. On
    /// acceptance the upload status is held and the request is returned for
    /// the run loop to dispatch.
    pub fn begin_upload(&mut self) -> Option<UploadRequest> {
        let raw = self.attach_input.submit();
        self.mode = Mode::Compose;

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let path = PathBuf::from(trimmed);
        let mime_type = mime_for_path(&path).to_string();

        self.session.begin_upload();
        let Some(kind) = FileKind::from_mime(&mime_type) else {
            self.session.fail_upload();
            self.set_error(format!("Unsupported file type: {mime_type}"));
            return None;
        };

        let file_name = path
            .file_name()
            .map_or_else(|| trimmed.to_string(), |n| n.to_string_lossy().to_string());

        Some(UploadRequest {
            path,
            file_name,
            mime_type,
            kind,
        })
    }

    /// Record a successful ingestion.
    pub fn upload_resolved(&mut self, kind: FileKind) {
        self.session.finish_upload(kind);
        self.set_notice("Documents added successfully".to_string());
    }

    /// Record a failed upload.
    pub fn upload_failed(&mut self, message: String) {
        self.session.fail_upload();
        self.set_error(message);
    }

    // === Export ===

    /// Export the transcript to a markdown file.
    fn export_transcript(&mut self) {
        use dochat_client::Sender;

        let mut content = String::new();
        content.push_str("# dochat transcript\n\n");

        for msg in self.session.messages() {
            let who = match msg.sender {
                Sender::User => "You",
                Sender::Bot => "Bot",
            };
            content.push_str(&format!("### {} ({})\n\n", who, msg.time_of_day()));
            content.push_str(&msg.text);
            content.push_str("\n\n");
        }

        match std::fs::write(&self.export_path, &content) {
            Ok(()) => {
                self.set_notice(format!("Exported to {}", self.export_path.display()));
            }
            Err(e) => {
                self.set_error(format!("Export failed: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dochat_client::OpStatus;

    fn test_app() -> App {
        App::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("a/report.PDF")), "application/pdf");
        assert_eq!(mime_for_path(Path::new("notes.txt")), "text/plain");
        assert_eq!(mime_for_path(Path::new("data.csv")), "text/csv");
        assert_eq!(
            mime_for_path(Path::new("payload.json")),
            "application/octet-stream"
        );
        assert_eq!(mime_for_path(Path::new("no_extension")), "application/octet-stream");
    }

    #[test]
    fn test_begin_query_rejects_blank_and_pending() {
        let mut app = test_app();
        assert!(app.begin_query().is_none());

        app.input.insert_str("What is this?");
        let (route, text) = app.begin_query().unwrap();
        assert_eq!(route, QueryRoute::General);
        assert_eq!(text, "What is this?");
        assert!(app.input.is_empty());

        // Second submission while pending is rejected
        app.input.insert_str("another");
        assert!(app.begin_query().is_none());
        assert_eq!(app.session.messages().len(), 1);
    }

    #[test]
    fn test_query_routes_follow_ingestion() {
        let mut app = test_app();
        app.upload_resolved(FileKind::Csv);

        app.input.insert_str("sum the rows");
        let (route, _) = app.begin_query().unwrap();
        assert_eq!(route, QueryRoute::Tabular);
    }

    #[test]
    fn test_begin_upload_rejects_unsupported_extension_locally() {
        let mut app = test_app();
        app.mode = Mode::Attach;
        app.attach_input.insert_str("payload.json");

        assert!(app.begin_upload().is_none());
        assert_eq!(app.mode, Mode::Compose);
        assert_eq!(app.session.upload, OpStatus::Failed);
        let notice = app.notice.as_ref().unwrap();
        assert!(notice.is_error);
        assert!(notice.text.contains("Unsupported file type"));
    }

    #[test]
    fn test_begin_upload_builds_request() {
        let mut app = test_app();
        app.mode = Mode::Attach;
        app.attach_input.insert_str("  docs/report.pdf  ");

        let request = app.begin_upload().unwrap();
        assert_eq!(request.kind, FileKind::Pdf);
        assert_eq!(request.file_name, "report.pdf");
        assert_eq!(request.mime_type, "application/pdf");
        assert!(app.session.upload.is_pending());
    }

    #[test]
    fn test_attach_while_upload_pending_is_refused() {
        let mut app = test_app();
        app.session.begin_upload();
        app.handle_action(Action::Attach);

        assert_eq!(app.mode, Mode::Compose);
        assert!(app.notice.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_notice_expires_after_ttl() {
        let mut app = test_app();
        app.set_notice("saved".to_string());
        assert!(app.notice.is_some());

        for _ in 0..12 {
            app.tick();
        }
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_export_transcript_writes_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app();
        app.export_path = dir.path().join("transcript.md");

        app.session.begin_query("What is the summary?");
        app.session.finish_query("It is a report.");
        app.handle_action(Action::Export);

        let content = std::fs::read_to_string(&app.export_path).unwrap();
        assert!(content.contains("### You"));
        assert!(content.contains("What is the summary?"));
        assert!(content.contains("### Bot"));
        assert!(content.contains("It is a report."));
        assert!(app.notice.as_ref().is_some_and(|n| !n.is_error));
    }

    #[test]
    fn test_esc_closes_help_then_attach_prompt() {
        let mut app = test_app();
        app.show_help = true;
        app.mode = Mode::Attach;

        app.handle_action(Action::Back);
        assert!(!app.show_help);
        assert_eq!(app.mode, Mode::Attach);

        app.handle_action(Action::Back);
        assert_eq!(app.mode, Mode::Compose);
    }
}
