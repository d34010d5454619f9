//! Shared widgets for the dochat TUI.

mod prompt;
mod status_bar;
mod transcript;

pub use prompt::{Prompt, PromptState};
pub use status_bar::StatusBar;
pub use transcript::{Transcript, TranscriptState, SCROLL_SPEED};
