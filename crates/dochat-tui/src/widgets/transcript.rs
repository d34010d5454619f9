//! Transcript pane widget.
//!
//! Renders the conversation in insertion order with sender-differentiated
//! styling and per-message timestamps, plus an animated typing indicator
//! while an answer is outstanding. Follow mode keeps the newest entry in
//! view until the user scrolls away from the bottom.

use crate::theme::{Styles, TYPING_FRAMES};
use dochat_client::{Message, Sender};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

/// Lines scrolled per scroll step.
pub const SCROLL_SPEED: usize = 3;

/// Indentation for message bodies under their header line.
const BODY_INDENT: &str = "  ";

/// Scroll and follow state for the transcript pane.
#[derive(Debug)]
pub struct TranscriptState {
    /// First visible line.
    scroll: usize,
    /// Whether to auto-follow new content.
    follow: bool,
    /// Maximum scroll offset as of the last render.
    max_scroll: usize,
}

impl Default for TranscriptState {
    fn default() -> Self {
        Self {
            scroll: 0,
            follow: true,
            max_scroll: 0,
        }
    }
}

impl TranscriptState {
    /// Create a new state in follow mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether follow mode is active.
    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Current scroll offset.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Scroll up. Disables follow mode.
    pub fn scroll_up(&mut self, lines: usize) {
        self.follow = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Scroll down. Re-enables follow mode when the bottom is reached.
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll);
        if self.scroll == self.max_scroll {
            self.follow = true;
        }
    }

    /// Jump to the bottom and re-enable follow mode.
    pub fn follow_bottom(&mut self) {
        self.follow = true;
    }
}

/// Transcript pane widget.
pub struct Transcript<'a> {
    messages: &'a [Message],
    /// Show the typing indicator after the last message.
    typing: bool,
    /// Tick counter driving the indicator animation.
    tick: usize,
    focused: bool,
}

impl<'a> Transcript<'a> {
    /// Create a transcript widget over the session's messages.
    pub fn new(messages: &'a [Message]) -> Self {
        Self {
            messages,
            typing: false,
            tick: 0,
            focused: false,
        }
    }

    /// Show the animated typing indicator.
    #[must_use]
    pub fn typing(mut self, typing: bool, tick: usize) -> Self {
        self.typing = typing;
        self.tick = tick;
        self
    }

    /// Set whether this pane is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Build the full line list at the given wrap width.
    fn build_lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let body_width = width.saturating_sub(BODY_INDENT.len()).max(1);

        for msg in self.messages {
            let (label, style) = match msg.sender {
                Sender::User => ("You", Styles::user()),
                Sender::Bot => ("Bot", Styles::bot()),
            };
            lines.push(Line::from(vec![
                Span::styled(label.to_string(), style),
                Span::styled(format!("  {}", msg.time_of_day()), Styles::dim()),
            ]));

            for wrapped in textwrap::wrap(&msg.text, body_width) {
                lines.push(Line::from(Span::styled(
                    format!("{BODY_INDENT}{wrapped}"),
                    Styles::default(),
                )));
            }
            lines.push(Line::default());
        }

        if self.typing {
            let frame = TYPING_FRAMES[self.tick % TYPING_FRAMES.len()];
            lines.push(Line::from(vec![
                Span::styled("Bot".to_string(), Styles::bot()),
                Span::styled(format!("  is typing{frame}"), Styles::dim()),
            ]));
        }

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "Attach a document (Ctrl+A) and ask a question about it.",
                Styles::dim(),
            )));
        }

        lines
    }
}

impl StatefulWidget for Transcript<'_> {
    type State = TranscriptState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if self.focused {
            Styles::border_active()
        } else {
            Styles::border()
        };

        let block = Block::default()
            .title(" Conversation ")
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Styles::default());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 1 || inner.width < 1 {
            return;
        }

        let lines = self.build_lines(inner.width as usize);
        let visible = inner.height as usize;

        state.max_scroll = lines.len().saturating_sub(visible);
        if state.follow {
            state.scroll = state.max_scroll;
        } else {
            state.scroll = state.scroll.min(state.max_scroll);
        }

        let window: Vec<Line<'_>> = lines
            .into_iter()
            .skip(state.scroll)
            .take(visible)
            .collect();
        Paragraph::new(window).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_content(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn draw(messages: &[Message], typing: bool, state: &mut TranscriptState) -> String {
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let widget = Transcript::new(messages).typing(typing, 0);
                frame.render_stateful_widget(widget, frame.area(), state);
            })
            .unwrap();
        buffer_content(&terminal)
    }

    #[test]
    fn test_renders_messages_in_order_with_timestamps() {
        let messages = vec![Message::user("What is the summary?"), Message::bot("A report.")];
        let mut state = TranscriptState::new();
        let content = draw(&messages, false, &mut state);

        assert!(content.contains("You"));
        assert!(content.contains("What is the summary?"));
        assert!(content.contains("Bot"));
        assert!(content.contains("A report."));
        // A HH:MM stamp is present
        assert!(content.contains(&messages[0].time_of_day()));
    }

    #[test]
    fn test_typing_indicator_is_view_only() {
        let messages = vec![Message::user("hello")];
        let mut state = TranscriptState::new();

        let content = draw(&messages, true, &mut state);
        assert!(content.contains("is typing"));

        let content = draw(&messages, false, &mut state);
        assert!(!content.contains("is typing"));
    }

    #[test]
    fn test_follow_mode_shows_newest_message() {
        let messages: Vec<Message> = (0..30)
            .map(|i| Message::user(format!("message number {i}")))
            .collect();
        let mut state = TranscriptState::new();
        let content = draw(&messages, false, &mut state);

        assert!(state.is_following());
        assert!(content.contains("message number 29"));
        assert!(!content.contains("message number 0 "));
    }

    #[test]
    fn test_scroll_up_disables_follow_and_scroll_down_restores_it() {
        let messages: Vec<Message> = (0..30)
            .map(|i| Message::user(format!("message number {i}")))
            .collect();
        let mut state = TranscriptState::new();
        draw(&messages, false, &mut state);

        state.scroll_up(SCROLL_SPEED);
        assert!(!state.is_following());

        // Scrolling back past the bottom re-engages follow
        state.scroll_down(state.max_scroll);
        assert!(state.is_following());
    }

    #[test]
    fn test_empty_transcript_renders_hint() {
        let mut state = TranscriptState::new();
        let content = draw(&[], false, &mut state);
        assert!(content.contains("Attach a document"));
    }

    #[test]
    fn test_minimum_size_does_not_panic() {
        let backend = TestBackend::new(6, 2);
        let mut terminal = Terminal::new(backend).unwrap();
        let messages = vec![Message::user("hi")];
        let mut state = TranscriptState::new();
        terminal
            .draw(|frame| {
                let widget = Transcript::new(&messages);
                frame.render_stateful_widget(widget, frame.area(), &mut state);
            })
            .unwrap();
    }
}
