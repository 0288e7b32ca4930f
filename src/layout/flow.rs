//! Row-wrapping flow layout for chips.
//!
//! The walk keeps two independent running positions:
//!
//! - a *row accumulator* (`row_used`) that decides which row number a chip
//!   belongs to, starting every row at zero and testing `used + width > row_width`;
//! - a *frame cursor* (`current_x`, `current_y`) that decides where the chip is
//!   drawn, starting the first row after the leading reserved space and testing
//!   `x + width <= row_width`.
//!
//! The two agree for ordinary input. They can disagree when a leading label is
//! present or when an oversized chip gets clipped, in which case the row number
//! and the drawn line of a chip differ. Both are reported as computed.

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect, Size};

/// Horizontal alignment of each drawn row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Inputs of a layout pass that are not per-chip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowParams {
    /// Full width of the container.
    pub container_width: f64,
    /// Space taken on the first line before the first chip (prefix label).
    pub leading_reserved: f64,
    /// Space removed from the end of every row (clear affordance).
    pub trailing_reserved: f64,
    /// Gap between neighbouring chips on a row.
    pub horizontal_gap: f64,
    /// Gap between rows.
    pub vertical_gap: f64,
    pub alignment: Alignment,
}

impl FlowParams {
    /// Params for a plain container with no reserved space.
    pub fn new(container_width: f64, horizontal_gap: f64, vertical_gap: f64) -> Self {
        Self {
            container_width,
            leading_reserved: 0.0,
            trailing_reserved: 0.0,
            horizontal_gap,
            vertical_gap,
            alignment: Alignment::Left,
        }
    }

    /// Width usable by chips on every row.
    pub fn row_width(&self) -> f64 {
        self.container_width - self.trailing_reserved
    }
}

/// Output of a layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutResult {
    /// Row number (1-based) of every chip, by chip index.
    pub row_assignment: Vec<usize>,
    /// Frame of every chip, by chip index.
    pub frames: Vec<Rect>,
    /// Number of rows opened by the row accumulator.
    pub row_count: usize,
    /// Height of a chip row (all chips share one height).
    pub row_height: f64,
    /// Top of the last drawn line.
    pub content_y: f64,
    /// Bottom of the last drawn line, zero when there are no chips.
    pub content_height: f64,
    /// Frame cursor after the last chip, where following content starts.
    pub next_x: f64,
}

impl LayoutResult {
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Chip indices grouped by drawn line, in order.
    pub fn lines(&self) -> Vec<Vec<usize>> {
        let mut lines: Vec<Vec<usize>> = Vec::new();
        let mut last_y: Option<f64> = None;
        for (index, frame) in self.frames.iter().enumerate() {
            if last_y == Some(frame.y) {
                if let Some(line) = lines.last_mut() {
                    line.push(index);
                }
            } else {
                lines.push(vec![index]);
                last_y = Some(frame.y);
            }
        }
        lines
    }
}

/// Lay out chips of the given sizes into wrapped rows.
pub fn flow_layout(sizes: &[Size], params: &FlowParams) -> LayoutResult {
    let row_width = params.row_width();
    let gap = params.horizontal_gap;

    let mut result = LayoutResult {
        next_x: params.leading_reserved,
        ..LayoutResult::default()
    };

    let mut current_x = params.leading_reserved;
    let mut current_y = 0.0;
    let mut current_row = 0;
    let mut row_tag_count = 0;
    let mut row_used = 0.0;

    for size in sizes {
        // Row bookkeeping
        if row_tag_count == 0 || row_used + size.width > row_width {
            current_row += 1;
            row_used = 0.0;
            row_tag_count = 0;
        }
        row_tag_count += 1;
        row_used += size.width + gap;

        // Frame placement
        let frame = if current_x + size.width <= row_width {
            Rect::new(current_x, current_y, size.width, size.height)
        } else {
            current_y += size.height + params.vertical_gap;
            current_x = 0.0;
            Rect::new(
                current_x,
                current_y,
                size.width.min(params.container_width),
                size.height,
            )
        };
        current_x += frame.width + gap;

        result.row_assignment.push(current_row);
        result.frames.push(frame);
        result.row_height = size.height;
    }

    result.row_count = current_row;
    result.content_y = current_y;
    result.next_x = current_x;
    if !result.frames.is_empty() {
        result.content_height = current_y + result.row_height;
    }

    align_lines(&mut result, row_width, params.alignment);
    result
}

/// Shift every drawn line according to the alignment.
fn align_lines(result: &mut LayoutResult, row_width: f64, alignment: Alignment) {
    if alignment == Alignment::Left {
        return;
    }
    let lines = result.lines();
    let line_count = lines.len();
    for (line_index, line) in lines.into_iter().enumerate() {
        let Some(&last) = line.last() else { continue };
        let content_width = result.frames[last].right();
        let offset = match alignment {
            Alignment::Left => 0.0,
            Alignment::Center => (row_width - content_width) / 2.0,
            Alignment::Right => row_width - content_width,
        }
        .max(0.0);
        for index in line {
            result.frames[index].x += offset;
        }
        if line_index + 1 == line_count {
            result.next_x += offset;
        }
    }
}

/// Frame of the text entry field that follows the last chip.
///
/// The field takes the rest of the last line. When less than
/// `min_input_width` would remain, it moves to a new line below.
pub fn input_field_frame(
    layout: &LayoutResult,
    container_width: f64,
    min_input_width: f64,
    field_height: f64,
    vertical_gap: f64,
) -> Rect {
    let mut origin = Point::new(layout.next_x, layout.content_y);
    if layout.next_x + min_input_width >= container_width {
        origin = Point::new(0.0, layout.content_y + field_height + vertical_gap);
    }
    Rect::new(
        origin.x,
        origin.y,
        (container_width - origin.x).max(0.0),
        field_height,
    )
}
