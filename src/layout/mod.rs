//! Geometry and the row-wrapping flow layout used by the tag list.
//!
//! Everything in this module is pure: it takes sizes and container metrics
//! and returns frames. The coordinator in `ui::components::tag_list` owns
//! the chips and applies the results.

pub mod flow;
pub mod geometry;
pub mod height;

pub use flow::{flow_layout, input_field_frame, Alignment, FlowParams, LayoutResult};
pub use geometry::{Point, Rect, Size};
pub use height::{negotiate_height, ContainerGeometry};
