//! Test utilities for tui-store applications
//!
//! - [`key`]: Create `KeyEvent` from string (e.g., `key("ctrl+c")`)
//! - [`CallCounter`]: Observer that counts how often the store notified it
//! - [`RenderHarness`]: Render into an in-memory buffer and read it back as text
//!
//! # Example
//!
//! ```ignore
//! use tui_store::testing::CallCounter;
//!
//! let counter = CallCounter::new();
//! let id = store.subscribe(counter.observer());
//! store.dispatch(TodoAction::AddItem("x".into()))?;
//! assert_eq!(counter.count(), 1);
//! ```

use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

use crate::event::EventKind;

/// Create a `KeyEvent` from a key string.
///
/// Accepts a single character, a named key (`enter`, `esc`, `backspace`,
/// `tab`, `up`, `down`, `left`, `right`) and optional `ctrl+`, `alt+` or
/// `shift+` prefixes.
///
/// ```
/// use tui_store_core::testing::key;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let k = key("ctrl+c");
/// assert_eq!(k.code, KeyCode::Char('c'));
/// assert!(k.modifiers.contains(KeyModifiers::CONTROL));
///
/// assert_eq!(key("enter").code, KeyCode::Enter);
/// ```
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    let mut modifiers = KeyModifiers::empty();
    let mut rest = s;
    loop {
        let lower = rest.to_ascii_lowercase();
        if lower.starts_with("ctrl+") {
            modifiers |= KeyModifiers::CONTROL;
            rest = &rest[5..];
        } else if lower.starts_with("alt+") {
            modifiers |= KeyModifiers::ALT;
            rest = &rest[4..];
        } else if lower.starts_with("shift+") {
            modifiers |= KeyModifiers::SHIFT;
            rest = &rest[6..];
        } else {
            break;
        }
    }

    let code = match rest.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "space" => KeyCode::Char(' '),
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => panic!("Invalid key string: {:?}", s),
            }
        }
    };

    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Key events for typing `text` character by character
pub fn type_text(text: &str) -> Vec<EventKind> {
    text.chars().map(|c| EventKind::Key(char_key(c))).collect()
}

/// Observer that counts notifications.
///
/// Clones share the same count, so keep one clone and hand
/// [`observer`](CallCounter::observer) closures to the store.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    calls: Rc<Cell<usize>>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh observer closure incrementing this counter
    pub fn observer(&self) -> impl FnMut() + 'static {
        let calls = Rc::clone(&self.calls);
        move || calls.set(calls.get() + 1)
    }

    /// Number of notifications seen so far
    pub fn count(&self) -> usize {
        self.calls.get()
    }
}

/// Renders into a ratatui `TestBackend` for assertions on the output.
///
/// ```ignore
/// let mut render = RenderHarness::new(40, 10);
/// let output = render.render_to_string_plain(|frame| {
///     panel.render(frame, frame.area(), props);
/// });
/// assert!(output.contains("buy milk"));
/// ```
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal size.
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("Failed to create test terminal: {e}"));
        Self { terminal }
    }

    /// Render a frame and return the resulting buffer
    pub fn render<F: FnOnce(&mut Frame)>(&mut self, f: F) -> &Buffer {
        self.terminal
            .draw(f)
            .unwrap_or_else(|e| panic!("Failed to draw test frame: {e}"));
        self.terminal.backend().buffer()
    }

    /// Render a frame and return its text without styling
    pub fn render_to_string_plain<F: FnOnce(&mut Frame)>(&mut self, f: F) -> String {
        buffer_to_string_plain(self.render(f))
    }
}

/// Buffer contents as plain text, one line per row, trailing spaces trimmed
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let width = buffer.area.width.max(1) as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_key_simple() {
        let k = key("q");
        assert_eq!(k.code, KeyCode::Char('q'));
        assert_eq!(k.modifiers, KeyModifiers::empty());
    }

    #[test]
    fn test_key_with_modifiers() {
        let k = key("ctrl+alt+x");
        assert_eq!(k.code, KeyCode::Char('x'));
        assert!(k.modifiers.contains(KeyModifiers::CONTROL));
        assert!(k.modifiers.contains(KeyModifiers::ALT));
    }

    #[test]
    fn test_key_named() {
        assert_eq!(key("esc").code, KeyCode::Esc);
        assert_eq!(key("Enter").code, KeyCode::Enter);
        assert_eq!(key("backspace").code, KeyCode::Backspace);
        assert_eq!(key("space").code, KeyCode::Char(' '));
    }

    #[test]
    #[should_panic(expected = "Invalid key string")]
    fn test_key_invalid() {
        key("nope");
    }

    #[test]
    fn test_call_counter_shared_between_clones() {
        let counter = CallCounter::new();
        let mut first = counter.observer();
        let mut second = counter.clone().observer();

        first();
        second();
        second();

        assert_eq!(counter.count(), 3);
    }

    #[test]
    fn test_render_harness_plain_text() {
        let mut render = RenderHarness::new(12, 2);
        let output = render.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("hello"), frame.area());
        });

        assert_eq!(output, "hello\n");
    }
}
