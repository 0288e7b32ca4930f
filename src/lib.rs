//! taglist - a flow-layout tag list for terminal user interfaces.
//!
//! The core is [`ui::TagListView`]: it lays tags out as chips in wrapping
//! rows, tracks selection and highlight, and turns taps, backspaces and drags
//! into calls on a host-provided data source and delegate.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod layout;
pub mod logging;
pub mod ui;

pub use config::Config;
pub use error::{AppError, Result};
pub use ui::{TagListDataSource, TagListDelegate, TagListView};
