//! Terminal event handling.
//!
//! Crossterm events are polled by [`EventHandler`] and reduced to [`Event`]s,
//! which the application consumes one at a time.

mod handler;
mod keys;

use crossterm::event::{KeyEvent, MouseEvent};

pub use handler::EventHandler;
pub use keys::{Command, KeyBindings};

/// An event delivered to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// The terminal was resized to the given columns and rows.
    Resize(u16, u16),
    /// No input arrived within the tick rate.
    Tick,
    Quit,
}
