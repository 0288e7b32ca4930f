//! Reusable UI components.

pub mod backspace_input;
pub mod chip;
pub mod tag_list;

pub use backspace_input::{BackspaceInput, InputOutcome};
pub use chip::{CellMeasure, Chip, ChipColors, ChipIntent, ChipState, TextMeasure};
pub use tag_list::{
    DragOutcome, DragPhase, DragSession, Focus, Mode, SharedDataSource, SharedDelegate,
    TagListDataSource, TagListDelegate, TagListView, TapTarget,
};
