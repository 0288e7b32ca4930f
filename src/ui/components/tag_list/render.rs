//! Drawing the tag list into a terminal buffer.
//!
//! Layout coordinates are in cells, relative to the top-left of the area the
//! list is rendered into. Anything below the negotiated height is clipped.

use ratatui::{
    buffer::Buffer,
    layout::Rect as CellRect,
    style::{Modifier, Style},
    widgets::{Paragraph, Widget},
    Frame,
};

use super::{Focus, TagListView};
use crate::layout::Rect;

const CLEAR_GLYPH: &str = "⌫";

impl TagListView {
    /// Draw the list into `area`, placing the cursor when the input has focus.
    pub fn render(&self, frame: &mut Frame, area: CellRect) {
        let bounds = self.bounds(area);
        if bounds.is_empty() {
            return;
        }
        self.render_content(bounds, frame.buffer_mut());

        if let Some(input) = self.input_frame.and_then(|rect| to_cells(rect, bounds)) {
            self.input.render(
                frame,
                input,
                self.focus == Focus::Input,
                self.config.appearance.input_text_color,
            );
        }
    }

    /// Part of `area` the list occupies at its current height.
    pub fn bounds(&self, area: CellRect) -> CellRect {
        let height = self.geometry.current_height.ceil().max(0.0) as u16;
        CellRect::new(area.x, area.y, area.width, height.min(area.height))
    }

    /// Draw everything except the text input.
    fn render_content(&self, bounds: CellRect, buf: &mut Buffer) {
        let appearance = &self.config.appearance;
        let metrics = &self.config.metrics;

        if let (Some(label), Some(area)) = (
            appearance.prefix_label.as_deref(),
            self.prefix_frame.and_then(|rect| to_cells(rect, bounds)),
        ) {
            Paragraph::new(label)
                .style(
                    Style::default()
                        .fg(appearance.prefix_label_text_color)
                        .bg(appearance.prefix_label_background_color),
                )
                .render(area, buf);
        }

        if self.is_collapsed() {
            if let Some(area) = self.collapsed_frame.and_then(|rect| to_cells(rect, bounds)) {
                Paragraph::new(self.collapsed_text.as_str())
                    .style(Style::default().fg(appearance.collapsed_text_color))
                    .render(area, buf);
            }
            return;
        }

        for chip in self.chips.iter().filter(|chip| !chip.is_hidden()) {
            if let Some(area) = to_cells(chip.frame(), bounds) {
                chip.render(area, buf, metrics, appearance);
            }
        }

        if let Some(area) = self.clear_frame.and_then(|rect| to_cells(rect, bounds)) {
            Paragraph::new(CLEAR_GLYPH)
                .style(Style::default().fg(appearance.text_color))
                .render(area, buf);
        }

        if let Some(session) = &self.drag {
            let snapshot = session.snapshot();
            if let Some(area) = to_cells(snapshot.frame(), bounds) {
                snapshot.render(area, buf, metrics, appearance);
                buf.set_style(area, Style::default().add_modifier(Modifier::BOLD));
            }
        }
    }
}

/// Convert a layout rect to the cells it covers inside `bounds`.
fn to_cells(rect: Rect, bounds: CellRect) -> Option<CellRect> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let left = (f64::from(bounds.x) + rect.x.floor()).max(f64::from(bounds.left()));
    let top = (f64::from(bounds.y) + rect.y.floor()).max(f64::from(bounds.top()));
    let right = (f64::from(bounds.x) + rect.right().ceil()).min(f64::from(bounds.right()));
    let bottom = (f64::from(bounds.y) + rect.bottom().ceil()).min(f64::from(bounds.bottom()));
    if right <= left || bottom <= top {
        return None;
    }
    Some(CellRect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}
