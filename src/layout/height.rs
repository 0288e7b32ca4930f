//! Container height negotiation.
//!
//! After every adjusting layout pass the container grows to fit its content,
//! up to `max_height`. Anything below `max_height` is clipped by the
//! renderer; scrolling belongs to whatever hosts the tag list.

/// Size state of the tag list container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerGeometry {
    /// Width available for rows.
    pub width: f64,
    /// Height captured when the container was created.
    pub original_height: f64,
    /// Ceiling for growth.
    pub max_height: f64,
    /// Height after the last negotiation.
    pub current_height: f64,
}

impl ContainerGeometry {
    /// Create geometry for a container of the given initial size.
    pub fn new(width: f64, height: f64, max_height: f64) -> Self {
        Self {
            width,
            original_height: height,
            max_height,
            current_height: height,
        }
    }

    /// Recompute `current_height` for content whose last row starts at `content_y`.
    ///
    /// Returns true if the height changed.
    pub fn negotiate(&mut self, content_y: f64, tag_row_height: f64, vertical_margin: f64) -> bool {
        let new_height = negotiate_height(self, content_y, tag_row_height, vertical_margin);
        let changed = new_height != self.current_height;
        self.current_height = new_height;
        changed
    }
}

/// Height the container should take for content whose last row starts at `content_y`.
///
/// The result is always within `[original_height, max_height]`; when the two
/// bounds conflict the original height wins.
pub fn negotiate_height(
    geometry: &ContainerGeometry,
    content_y: f64,
    tag_row_height: f64,
    vertical_margin: f64,
) -> f64 {
    let needed = content_y + tag_row_height;
    let grown = needed + 2.0 * vertical_margin;

    let height = if needed > geometry.current_height {
        if needed <= geometry.max_height {
            grown
        } else {
            geometry.max_height
        }
    } else if needed > geometry.original_height {
        grown
    } else {
        geometry.original_height
    };

    height.min(geometry.max_height).max(geometry.original_height)
}
