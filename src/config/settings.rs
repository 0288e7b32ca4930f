//! Size and behavior settings.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};
use crate::layout::Alignment;

/// Font description used to size chips.
///
/// `point_size` sets the chip text height; `advance` is the width of one
/// display column of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    pub point_size: f64,
    pub advance: f64,
}

impl Font {
    pub fn new(point_size: f64, advance: f64) -> Self {
        Self {
            point_size,
            advance,
        }
    }

    /// A font where every character is one cell wide and one cell tall.
    pub fn cell() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(12.0, 7.0)
    }
}

/// Sizes used by layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    /// Space above and below the title inside a chip.
    pub vertical_padding: f64,
    /// Space left and right of the title inside a chip.
    pub horizontal_padding: f64,
    /// Space between rows.
    pub vertical_margin: f64,
    /// Space between chips on a row.
    pub horizontal_margin: f64,
    /// Row alignment.
    pub alignment: Alignment,
    /// Ceiling for container growth.
    pub max_height: f64,
    /// Narrowest input field kept on the last row before it wraps.
    pub min_input_width: f64,
    /// Height of the input field and of a row in height negotiation.
    pub tag_row_height: f64,
    /// Width added to a chip that shows its remove affordance.
    pub remove_affordance_width: f64,
    /// Width reserved on every row for the clear affordance.
    pub clear_affordance_width: f64,
    /// Chip text font.
    pub font: Font,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            font: Font::default(),
            vertical_padding: 2.0,
            horizontal_padding: 5.0,
            vertical_margin: 2.0,
            horizontal_margin: 2.0,
            alignment: Alignment::Left,
            max_height: 150.0,
            min_input_width: 80.0,
            tag_row_height: 30.0,
            remove_affordance_width: 24.0,
            clear_affordance_width: 22.0,
        }
    }
}

impl Metrics {
    /// Metrics for a terminal where one point is one cell.
    pub fn terminal() -> Self {
        Self {
            font: Font::cell(),
            vertical_padding: 0.0,
            horizontal_padding: 1.0,
            vertical_margin: 0.0,
            horizontal_margin: 1.0,
            alignment: Alignment::Left,
            max_height: 8.0,
            min_input_width: 12.0,
            tag_row_height: 1.0,
            remove_affordance_width: 2.0,
            clear_affordance_width: 2.0,
        }
    }

    /// Height of every chip.
    pub fn chip_height(&self) -> f64 {
        self.font.point_size + self.vertical_padding * 2.0
    }

    /// Check that sizes are usable.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.font.point_size <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "font point size must be positive, got {}",
                self.font.point_size
            )));
        }
        if self.font.advance <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "font advance must be positive, got {}",
                self.font.advance
            )));
        }

        let non_negative = [
            ("vertical_padding", self.vertical_padding),
            ("horizontal_padding", self.horizontal_padding),
            ("vertical_margin", self.vertical_margin),
            ("horizontal_margin", self.horizontal_margin),
            ("max_height", self.max_height),
            ("min_input_width", self.min_input_width),
            ("tag_row_height", self.tag_row_height),
            ("remove_affordance_width", self.remove_affordance_width),
            ("clear_affordance_width", self.clear_affordance_width),
        ];
        for (name, value) in non_negative {
            if value < 0.0 || value.is_nan() {
                return Err(ConfigError::ValidationError(format!(
                    "{} cannot be negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Mode flags of the tag list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Behavior {
    /// Start in editable mode.
    pub editable: bool,
    /// Start collapsed.
    pub collapsed: bool,
    /// Allow more than one selected tag.
    pub multiple_selection: bool,
    /// Show the input field while editable.
    pub allows_creation: bool,
    /// Show remove affordances and the clear affordance while editable.
    pub allows_removal: bool,
    /// Allow drag-to-reorder while editable.
    pub allows_reordering: bool,
    /// Undo the moves of a drag that ends cancelled.
    pub rollback_cancelled_drag: bool,
}
