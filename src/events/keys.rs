//! Key binding definitions.
//!
//! Control chords drive the demo application. Every other key goes to the
//! tag list so that plain characters can be typed into the tag input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// An application-level command bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleEditable,
    ToggleCollapsed,
    ToggleMultiSelect,
    /// Cancel a drag in progress or clear highlights.
    Cancel,
}

/// Key binding configuration.
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    /// Whether `q` quits while the tag list is not taking text.
    pub quit_on_q: bool,
}

impl KeyBindings {
    /// Create new key bindings.
    pub fn new(quit_on_q: bool) -> Self {
        Self { quit_on_q }
    }

    /// Resolve a key to a command.
    ///
    /// `typing` is true while the tag input has focus, which disables the
    /// single-letter bindings.
    pub fn command_for(&self, key: KeyEvent, typing: bool) -> Option<Command> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c') | KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(Command::Quit),
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => Some(Command::ToggleEditable),
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => Some(Command::ToggleCollapsed),
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => Some(Command::ToggleMultiSelect),
            (KeyCode::Esc, _) => Some(Command::Cancel),
            (KeyCode::Char('q'), KeyModifiers::NONE) if self.quit_on_q && !typing => {
                Some(Command::Quit)
            }
            _ => None,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(true)
    }
}
