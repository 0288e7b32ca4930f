//! User interface components.
//!
//! Everything that draws into a terminal buffer or reacts to input lives
//! here. Geometry is computed in [`crate::layout`] and only converted to
//! cells at render time.

pub mod components;

pub use components::{
    BackspaceInput, CellMeasure, Chip, ChipColors, ChipIntent, ChipState, DragOutcome, DragPhase,
    DragSession, Focus, InputOutcome, Mode, SharedDataSource, SharedDelegate, TagListDataSource,
    TagListDelegate, TagListView, TapTarget, TextMeasure,
};
