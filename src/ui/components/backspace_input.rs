//! Backspace-sensitive text input.
//!
//! Behaves like an ordinary single-field editor, with one extra signal:
//! pressing backspace while the field is empty is reported as
//! [`InputOutcome::BackspaceOnEmpty`] instead of being swallowed. Backspaces
//! that delete characters are plain edits.
//!
//! An [`invisible`](BackspaceInput::invisible) instance takes no space and
//! accepts no text. It exists to hold focus while a chip is highlighted so
//! that the next backspace still reaches the tag list.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Result of feeding a key to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// The key changed nothing (cursor moves included).
    Unchanged,
    /// The text was modified.
    Edited,
    /// Backspace was pressed while the text was empty.
    BackspaceOnEmpty,
    /// Enter was pressed with non-empty text.
    Submitted(String),
}

/// A text input that reports backspace on empty content.
#[derive(Debug, Clone, Default)]
pub struct BackspaceInput {
    /// The current input value.
    value: String,
    /// Cursor position as a byte offset on a char boundary.
    cursor: usize,
    /// Placeholder text shown when empty.
    placeholder: String,
    /// Zero-size focus trap that only listens for backspace.
    invisible: bool,
}

impl BackspaceInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the zero-size focus trap.
    pub fn invisible() -> Self {
        Self {
            invisible: true,
            ..Self::default()
        }
    }

    /// Create a new input with an initial value.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self {
            value,
            cursor,
            ..Self::default()
        }
    }

    pub fn is_invisible(&self) -> bool {
        self.invisible
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move cursor to end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        if self.invisible {
            return;
        }
        self.value = value.into();
        self.cursor = self.value.len();
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.value[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.value.len())
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent) -> InputOutcome {
        if key.code == KeyCode::Backspace && self.value.is_empty() {
            return InputOutcome::BackspaceOnEmpty;
        }
        if self.invisible {
            return InputOutcome::Unchanged;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => {
                if self.value.is_empty() {
                    InputOutcome::Unchanged
                } else {
                    InputOutcome::Submitted(self.value.clone())
                }
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                InputOutcome::Edited
            }
            // Backspace - delete character before cursor
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    let start = self.prev_boundary();
                    self.value.replace_range(start..self.cursor, "");
                    self.cursor = start;
                    InputOutcome::Edited
                } else {
                    InputOutcome::Unchanged
                }
            }
            // Delete - delete character at cursor
            (KeyCode::Delete, _) => {
                if self.cursor < self.value.len() {
                    let end = self.next_boundary();
                    self.value.replace_range(self.cursor..end, "");
                    InputOutcome::Edited
                } else {
                    InputOutcome::Unchanged
                }
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.cursor = self.prev_boundary();
                InputOutcome::Unchanged
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.cursor = self.next_boundary();
                InputOutcome::Unchanged
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                InputOutcome::Unchanged
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.value.len();
                InputOutcome::Unchanged
            }
            // Ctrl+U - clear line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.clear();
                InputOutcome::Edited
            }
            // Ctrl+W - delete word before cursor
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.cursor == 0 {
                    return InputOutcome::Unchanged;
                }
                let before = &self.value[..self.cursor];
                let word_start = before
                    .trim_end()
                    .rfind(|c: char| !c.is_alphanumeric())
                    .map(|i| i + 1)
                    .unwrap_or(0);
                self.value.replace_range(word_start..self.cursor, "");
                self.cursor = word_start;
                InputOutcome::Edited
            }
            _ => InputOutcome::Unchanged,
        }
    }

    /// Render the input into a single-line area.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool, text_color: Color) {
        if self.invisible || area.is_empty() {
            return;
        }

        let (display, style) = if self.value.is_empty() && !self.placeholder.is_empty() {
            (self.placeholder.as_str(), Style::default().fg(Color::DarkGray))
        } else {
            (self.value.as_str(), Style::default().fg(text_color))
        };
        frame.render_widget(Paragraph::new(display).style(style), area);

        if focused {
            let column = unicode_width::UnicodeWidthStr::width(&self.value[..self.cursor]) as u16;
            let cursor_x = area.x.saturating_add(column);
            if cursor_x < area.right() {
                frame.set_cursor_position(Position::new(cursor_x, area.y));
            }
        }
    }
}
