//! Bottom status bar: key hints, busy indicators, and transient notices.

use crate::app::Notice;
use crate::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// One-line status bar.
pub struct StatusBar<'a> {
    notice: Option<&'a Notice>,
    uploading: bool,
}

impl<'a> StatusBar<'a> {
    /// Create a status bar.
    pub fn new(notice: Option<&'a Notice>, uploading: bool) -> Self {
        Self { notice, uploading }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = if let Some(notice) = self.notice {
            let style = if notice.is_error {
                Styles::error()
            } else {
                Styles::success()
            };
            Line::from(Span::styled(format!(" {}", notice.text), style))
        } else {
            let mut spans = vec![Span::styled(
                " Ctrl+A attach  Ctrl+E export  F1 help  Ctrl+C quit",
                Styles::status_bar(),
            )];
            if self.uploading {
                spans.push(Span::styled("  [uploading...]", Styles::dim()));
            }
            Line::from(spans)
        };

        Paragraph::new(vec![line])
            .style(Styles::status_bar())
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(notice: Option<&Notice>, uploading: bool) -> String {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                frame.render_widget(StatusBar::new(notice, uploading), frame.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_shows_key_hints_by_default() {
        let content = draw(None, false);
        assert!(content.contains("Ctrl+A attach"));
    }

    #[test]
    fn test_notice_replaces_hints() {
        let notice = Notice {
            text: "Documents added successfully".into(),
            is_error: false,
        };
        let content = draw(Some(&notice), false);
        assert!(content.contains("Documents added successfully"));
        assert!(!content.contains("Ctrl+A attach"));
    }

    #[test]
    fn test_upload_indicator() {
        let content = draw(None, true);
        assert!(content.contains("[uploading...]"));
    }
}
