//! One-line prompt with cursor editing and submission history.
//!
//! The cursor is drawn by reversing the cell under it, so the text itself is
//! never displaced by a marker character. The cursor position is a byte
//! offset kept on a char boundary, which keeps multibyte input editable.

use crate::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// Render view over a [`PromptState`].
pub struct Prompt<'a> {
    text: &'a str,
    cursor: usize,
    block: Option<Block<'a>>,
    focused: bool,
    placeholder: Option<&'a str>,
}

impl<'a> Prompt<'a> {
    /// Wrap in a block (borders, title).
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// An unfocused prompt renders no cursor.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Hint text shown while the prompt is empty.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

impl Widget for Prompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let cursor_style = Styles::default().add_modifier(Modifier::REVERSED);
        let mut spans = vec![Span::styled("> ", Styles::active())];

        if self.text.is_empty() {
            if self.focused {
                spans.push(Span::styled(" ", cursor_style));
            }
            if let Some(hint) = self.placeholder {
                spans.push(Span::styled(hint, Styles::dim()));
            }
        } else if self.focused {
            let (before, rest) = self.text.split_at(self.cursor);
            spans.push(Span::styled(before, Styles::default()));
            let mut tail = rest.chars();
            match tail.next() {
                Some(under) => {
                    spans.push(Span::styled(under.to_string(), cursor_style));
                    spans.push(Span::styled(tail.as_str(), Styles::default()));
                }
                None => spans.push(Span::styled(" ", cursor_style)),
            }
        } else {
            spans.push(Span::styled(self.text, Styles::default()));
        }

        Paragraph::new(Line::from(spans))
            .style(Styles::default())
            .render(inner, buf);
    }
}

/// Editable prompt state.
#[derive(Debug, Clone, Default)]
pub struct PromptState {
    text: String,
    /// Byte offset into `text`, always on a char boundary.
    cursor: usize,
    history: Vec<String>,
    /// Steps back into `history`; `None` while editing the live draft.
    recall: Option<usize>,
    /// Draft stashed while recalling history.
    stash: String,
}

impl PromptState {
    /// Create an empty prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn content(&self) -> &str {
        &self.text
    }

    /// Whether the prompt holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Discard the text without touching history.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|ch| self.cursor + ch.len_utf8())
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Insert a string at the cursor.
    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) {
        if let Some(start) = self.prev_boundary() {
            self.text.remove(start);
            self.cursor = start;
        }
    }

    /// Remove the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    /// Move the cursor one character left.
    pub fn move_left(&mut self) {
        if let Some(start) = self.prev_boundary() {
            self.cursor = start;
        }
    }

    /// Move the cursor one character right.
    pub fn move_right(&mut self) {
        if let Some(end) = self.next_boundary() {
            self.cursor = end;
        }
    }

    /// Move the cursor to the start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Take the text, recording non-blank submissions in the history.
    pub fn submit(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.recall = None;
        self.stash.clear();
        if !text.trim().is_empty() {
            self.history.push(text.clone());
        }
        text
    }

    /// Recall the next-older submission.
    pub fn history_prev(&mut self) {
        let back = match self.recall {
            None if self.history.is_empty() => return,
            None => {
                self.stash = std::mem::take(&mut self.text);
                0
            }
            // Already at the oldest entry
            Some(back) if back + 1 >= self.history.len() => back,
            Some(back) => back + 1,
        };
        self.recall = Some(back);
        self.text = self.history[self.history.len() - 1 - back].clone();
        self.cursor = self.text.len();
    }

    /// Walk back toward the stashed draft.
    pub fn history_next(&mut self) {
        match self.recall {
            None => {}
            Some(0) => {
                self.recall = None;
                self.text = std::mem::take(&mut self.stash);
                self.cursor = self.text.len();
            }
            Some(back) => {
                self.recall = Some(back - 1);
                self.text = self.history[self.history.len() - back].clone();
                self.cursor = self.text.len();
            }
        }
    }

    /// Render view of the current state.
    pub fn widget(&self) -> Prompt<'_> {
        Prompt {
            text: &self.text,
            cursor: self.cursor,
            block: None,
            focused: true,
            placeholder: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_editing_at_cursor() {
        let mut state = PromptState::new();
        state.insert_str("hello");
        state.move_left();
        state.move_left();
        state.insert('X');
        assert_eq!(state.content(), "helXlo");

        state.backspace();
        assert_eq!(state.content(), "hello");

        state.move_home();
        state.delete();
        assert_eq!(state.content(), "ello");

        state.move_end();
        state.backspace();
        assert_eq!(state.content(), "ell");
    }

    #[test]
    fn test_multibyte_input_edits_whole_chars() {
        let mut state = PromptState::new();
        state.insert_str("héllo");
        state.move_left();
        state.move_left();
        state.move_left();
        state.move_left();
        state.delete();
        assert_eq!(state.content(), "hllo");

        state.insert('é');
        state.backspace();
        assert_eq!(state.content(), "hllo");
    }

    #[test]
    fn test_submit_records_history_and_resets() {
        let mut state = PromptState::new();
        state.insert_str("first question");
        assert_eq!(state.submit(), "first question");
        assert!(state.is_empty());

        // Blank submissions are not recorded
        state.insert_str("   ");
        state.submit();

        state.history_prev();
        assert_eq!(state.content(), "first question");
    }

    #[test]
    fn test_history_recall_restores_draft() {
        let mut state = PromptState::new();
        state.insert_str("one");
        state.submit();
        state.insert_str("two");
        state.submit();

        state.insert_str("draft in progress");
        state.history_prev();
        assert_eq!(state.content(), "two");
        state.history_prev();
        assert_eq!(state.content(), "one");
        // Pinned at the oldest entry
        state.history_prev();
        assert_eq!(state.content(), "one");

        state.history_next();
        assert_eq!(state.content(), "two");
        state.history_next();
        assert_eq!(state.content(), "draft in progress");
    }

    #[test]
    fn test_render_placeholder_and_text() {
        let backend = TestBackend::new(30, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = PromptState::new();

        terminal
            .draw(|frame| {
                frame.render_widget(state.widget().placeholder("type here"), frame.area());
            })
            .unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(content.contains("type here"));

        state.insert_str("a question");
        terminal
            .draw(|frame| {
                frame.render_widget(state.widget().placeholder("type here"), frame.area());
            })
            .unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(content.contains("a question"));
        assert!(!content.contains("type here"));
    }
}
