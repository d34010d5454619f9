//! Colors and styles for the dochat TUI.

use ratatui::style::{Color, Modifier, Style};

/// Typing-indicator animation frames, advanced once per tick.
pub const TYPING_FRAMES: [&str; 4] = ["   ", ".  ", ".. ", "..."];

// Palette: dark slate background, teal accent, green/red status pair.
const BG: Color = Color::Rgb(24, 26, 32);
const FG: Color = Color::Rgb(214, 219, 228);
const MUTED: Color = Color::Rgb(128, 134, 152);
const ACCENT: Color = Color::Rgb(86, 182, 194);
const BOT: Color = Color::Rgb(152, 195, 121);
const OK: Color = Color::Rgb(152, 195, 121);
const FAIL: Color = Color::Rgb(224, 108, 117);
const BAR_BG: Color = Color::Rgb(40, 44, 52);
const FRAME: Color = Color::Rgb(76, 82, 99);

fn on_bg(fg: Color) -> Style {
    Style::default().fg(fg).bg(BG)
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        on_bg(FG)
    }

    /// Secondary information (timestamps, hints).
    pub fn dim() -> Style {
        on_bg(MUTED)
    }

    /// User message header.
    pub fn user() -> Style {
        on_bg(ACCENT).add_modifier(Modifier::BOLD)
    }

    /// Bot message header.
    pub fn bot() -> Style {
        on_bg(BOT).add_modifier(Modifier::BOLD)
    }

    /// Focused/interactive element.
    pub fn active() -> Style {
        on_bg(ACCENT)
    }

    /// Failure notices.
    pub fn error() -> Style {
        on_bg(FAIL)
    }

    /// Success notices.
    pub fn success() -> Style {
        on_bg(OK)
    }

    /// Pane titles.
    pub fn title() -> Style {
        on_bg(ACCENT).add_modifier(Modifier::BOLD)
    }

    /// Status bar line.
    pub fn status_bar() -> Style {
        Style::default().fg(FG).bg(BAR_BG)
    }

    /// Border of an unfocused pane.
    pub fn border() -> Style {
        Style::default().fg(FRAME)
    }

    /// Border of the focused pane.
    pub fn border_active() -> Style {
        Style::default().fg(ACCENT)
    }
}
