//! Terminal event plumbing for the dochat TUI.
//!
//! Crossterm's event API blocks, so a dedicated thread polls it and forwards
//! everything over a channel; when the poll window elapses with no input the
//! thread emits a tick instead, which drives animations and notice expiry.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events delivered to the run loop.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// No input within the poll window.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Handle to the polling thread.
pub struct EventHandler {
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Start polling with the given tick interval.
    pub fn new(tick_ms: u64) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        std::thread::spawn(move || poll_loop(&tx, Duration::from_millis(tick_ms)));
        Self { events }
    }

    /// Next event, or `None` once the polling thread has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.events.recv().await
    }
}

fn poll_loop(tx: &mpsc::UnboundedSender<Event>, tick: Duration) {
    loop {
        let forwarded = if event::poll(tick).unwrap_or(false) {
            match event::read() {
                Ok(CrosstermEvent::Key(key)) => tx.send(Event::Key(key)),
                Ok(CrosstermEvent::Mouse(mouse)) => tx.send(Event::Mouse(mouse)),
                Ok(CrosstermEvent::Resize(w, h)) => tx.send(Event::Resize(w, h)),
                _ => Ok(()),
            }
        } else {
            tx.send(Event::Tick)
        };

        // The receiver is gone once the run loop exits
        if forwarded.is_err() {
            return;
        }
    }
}

/// Non-text action that can be performed in the TUI.
///
/// Printable keys are consumed by the focused prompt before actions are
/// considered, so actions live on control keys and function keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    Attach,
    Export,
    Back,
    ScrollUp,
    ScrollDown,
    FollowBottom,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('a') => Action::Attach,
            KeyCode::Char('e') => Action::Export,
            KeyCode::Char('b') => Action::FollowBottom,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::F(1) => Action::Help,
        KeyCode::Esc => Action::Back,
        KeyCode::PageUp => Action::ScrollUp,
        KeyCode::PageDown => Action::ScrollDown,
        _ => Action::None,
    }
}
