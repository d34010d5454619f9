//! dochat-tui: Terminal UI for the dochat document question-answering client
//!
//! This crate provides the TUI layer for dochat, including:
//! - A transcript pane with follow-mode auto-scroll and a typing indicator
//! - A question input with history and an attach-by-path prompt
//! - A status bar carrying key hints and transient notices

mod app;
mod event;
mod theme;
mod widgets;

pub use app::{mime_for_path, App, Mode, Notice, UploadRequest};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use dochat_client;

use dochat_client::{conversation, BackendError, Config, FileKind, SelectedFile};

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame, Terminal,
};
use std::io::{self, stdout};
use tokio::task::JoinHandle;

use theme::Styles;
use widgets::{StatusBar, Transcript, SCROLL_SPEED};

type QueryHandle = JoinHandle<Result<String, BackendError>>;
type UploadHandle = JoinHandle<Result<FileKind, String>>;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config)?;

    // Create event handler (4 Hz tick rate = 250ms)
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut query_handles: Vec<QueryHandle> = Vec::new();
    let mut upload_handles: Vec<UploadHandle> = Vec::new();

    loop {
        terminal.draw(|frame| draw(app, frame))?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if !handle_text_key(app, key, &mut query_handles, &mut upload_handles) {
                        let action = event::key_to_action(key);
                        app.handle_action(action);
                    }
                }
                Event::Mouse(mouse) => {
                    use crossterm::event::MouseEventKind;
                    match mouse.kind {
                        MouseEventKind::ScrollUp => {
                            app.transcript.scroll_up(SCROLL_SPEED);
                        }
                        MouseEventKind::ScrollDown => {
                            app.transcript.scroll_down(SCROLL_SPEED);
                        }
                        _ => {}
                    }
                }
                Event::Tick => {
                    app.tick();
                }
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        // Check for resolved queries
        let mut completed = Vec::new();
        for (i, handle) in query_handles.iter().enumerate() {
            if handle.is_finished() {
                completed.push(i);
            }
        }
        for i in completed.into_iter().rev() {
            if let Ok(result) = query_handles.remove(i).await {
                match result {
                    Ok(answer) => app.query_resolved(answer),
                    Err(e) => app.query_failed(&e),
                }
            }
        }

        // Check for finished uploads
        let mut completed = Vec::new();
        for (i, handle) in upload_handles.iter().enumerate() {
            if handle.is_finished() {
                completed.push(i);
            }
        }
        for i in completed.into_iter().rev() {
            if let Ok(result) = upload_handles.remove(i).await {
                match result {
                    Ok(kind) => app.upload_resolved(kind),
                    Err(message) => app.upload_failed(message),
                }
            }
        }

        if app.should_quit {
            for handle in query_handles {
                handle.abort();
            }
            for handle in upload_handles {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Handle key input for the focused text prompt.
/// Returns true if the key was handled (should not be processed as action).
fn handle_text_key(
    app: &mut App,
    key: crossterm::event::KeyEvent,
    query_handles: &mut Vec<QueryHandle>,
    upload_handles: &mut Vec<UploadHandle>,
) -> bool {
    use crossterm::event::{KeyCode, KeyModifiers};

    // Help overlay swallows plain keys
    if app.show_help {
        if let KeyCode::Char(_) = key.code {
            app.show_help = false;
            return true;
        }
        return false;
    }

    // Let the action handler deal with Ctrl+C, Ctrl+A, etc.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    let input = match app.mode {
        Mode::Compose => &mut app.input,
        Mode::Attach => &mut app.attach_input,
    };

    match key.code {
        // Special keys that should be handled as actions
        KeyCode::Esc | KeyCode::F(_) | KeyCode::PageUp | KeyCode::PageDown => false,

        KeyCode::Enter => {
            match app.mode {
                Mode::Compose => {
                    if let Some((route, text)) = app.begin_query() {
                        let backend = app.backend();
                        query_handles.push(tokio::spawn(async move {
                            conversation::resolve_answer(&backend, route, &text).await
                        }));
                    }
                }
                Mode::Attach => {
                    if let Some(request) = app.begin_upload() {
                        let backend = app.backend();
                        upload_handles.push(tokio::spawn(async move {
                            let bytes = tokio::fs::read(&request.path)
                                .await
                                .map_err(|e| format!("Error adding documents: {e}"))?;
                            let file =
                                SelectedFile::new(request.file_name, request.mime_type, bytes);
                            backend
                                .ingest(request.kind, &file)
                                .await
                                .map_err(|e| format!("Error adding documents: {e}"))?;
                            Ok(request.kind)
                        }));
                    }
                }
            }
            true
        }

        // Text input
        KeyCode::Char(c) => {
            input.insert(c);
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete();
            true
        }
        KeyCode::Left => {
            input.move_left();
            true
        }
        KeyCode::Right => {
            input.move_right();
            true
        }
        KeyCode::Home => {
            input.move_home();
            true
        }
        KeyCode::End => {
            input.move_end();
            true
        }
        KeyCode::Up => {
            input.history_prev();
            true
        }
        KeyCode::Down => {
            input.history_next();
            true
        }

        _ => false,
    }
}

/// Render the whole UI.
fn draw(app: &mut App, frame: &mut Frame<'_>) {
    let [transcript_area, input_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    // Transcript with typing indicator while a query is outstanding
    let typing = app.session.query.is_pending();
    let transcript = Transcript::new(app.session.messages())
        .typing(typing, app.tick)
        .focused(app.mode == Mode::Compose);
    frame.render_stateful_widget(transcript, transcript_area, &mut app.transcript);

    // Input prompt
    match app.mode {
        Mode::Compose => {
            let placeholder = if typing {
                "Waiting for answer..."
            } else {
                "Ask about your document..."
            };
            let block = Block::default()
                .title(" Ask ")
                .borders(Borders::ALL)
                .border_style(if typing {
                    Styles::border()
                } else {
                    Styles::border_active()
                })
                .style(Styles::default());
            let widget = app
                .input
                .widget()
                .block(block)
                .focused(!typing)
                .placeholder(placeholder);
            frame.render_widget(widget, input_area);
        }
        Mode::Attach => {
            let block = Block::default()
                .title(" Attach file ")
                .borders(Borders::ALL)
                .border_style(Styles::border_active())
                .style(Styles::default());
            let widget = app
                .attach_input
                .widget()
                .block(block)
                .placeholder("Path to a .pdf, .txt, or .csv file (Esc to cancel)");
            frame.render_widget(widget, input_area);
        }
    }

    // Status bar
    let status = StatusBar::new(app.notice.as_ref(), app.session.upload.is_pending());
    frame.render_widget(status, status_area);

    // Help overlay
    if app.show_help {
        render_help_overlay(frame.area(), frame.buffer_mut());
    }
}

/// Render the centered help overlay.
fn render_help_overlay(area: Rect, buf: &mut ratatui::buffer::Buffer) {
    let width = 46.min(area.width);
    let height = 12.min(area.height);
    let overlay = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    Clear.render(overlay, buf);

    let lines = vec![
        Line::styled("  Enter       send question", Styles::default()),
        Line::styled("  Ctrl+A      attach a file by path", Styles::default()),
        Line::styled("  Ctrl+E      export transcript", Styles::default()),
        Line::styled("  Up/Down     input history", Styles::default()),
        Line::styled("  PgUp/PgDn   scroll transcript", Styles::default()),
        Line::styled("  Ctrl+B      jump to newest message", Styles::default()),
        Line::styled("  Esc         close prompt/overlay", Styles::default()),
        Line::styled("  Ctrl+C      quit", Styles::default()),
        Line::default(),
        Line::styled("  any key to close", Styles::dim()),
    ];

    let block = Block::default()
        .title(" Help ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());
    Paragraph::new(lines).block(block).render(overlay, buf);
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
