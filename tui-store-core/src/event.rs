//! Terminal events delivered to components

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// The event payload handed to components
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
}

impl EventKind {
    /// Esc or Ctrl+C: the keys an application loop treats as "quit"
    pub fn is_interrupt(&self) -> bool {
        match self {
            EventKind::Key(key) => {
                key.code == KeyCode::Esc
                    || (key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c'))
            }
            EventKind::Resize(_, _) => false,
        }
    }

    /// The key event, if this is a key press (repeats and releases are ignored)
    pub fn key_press(&self) -> Option<&KeyEvent> {
        match self {
            EventKind::Key(key) if key.kind != KeyEventKind::Release => Some(key),
            _ => None,
        }
    }
}
