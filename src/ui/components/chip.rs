//! A single tag chip.
//!
//! A chip knows its title, its selection/highlight state, whether it shows a
//! remove affordance and where it was laid out. It resolves its own colors
//! from the [`Appearance`] whenever its state changes, but it never decides
//! what a tap means: it only reports [`ChipIntent`]s to its owner.

use ratatui::{
    buffer::Buffer,
    layout::Rect as CellRect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::config::{Appearance, Font, Metrics};
use crate::layout::{Point, Rect, Size};

/// Glyph drawn in the remove affordance.
const REMOVE_GLYPH: &str = "×";

/// Measures the width of a title in points.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font: &Font) -> f64;
}

/// Measures text by display columns, each `font.advance` points wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasure;

impl TextMeasure for CellMeasure {
    fn text_width(&self, text: &str, font: &Font) -> f64 {
        text.width() as f64 * font.advance
    }
}

/// Preferred size of a chip.
///
/// Height is the font size plus vertical padding on both sides. Width is the
/// measured title plus horizontal padding on both sides, plus the remove
/// affordance when it is shown.
pub fn intrinsic_size(
    title: &str,
    measure: &dyn TextMeasure,
    metrics: &Metrics,
    remove_enabled: bool,
) -> Size {
    let height = metrics.font.point_size + metrics.vertical_padding * 2.0;
    let mut width = measure.text_width(title, &metrics.font) + metrics.horizontal_padding * 2.0;
    if remove_enabled {
        width += metrics.remove_affordance_width;
    }
    Size::new(width, height)
}

/// Visual state of a chip, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipState {
    Highlighted,
    Selected,
    Normal,
}

/// Colors currently applied to a chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipColors {
    pub background: Color,
    pub border: Option<Color>,
    pub text: Color,
}

impl ChipColors {
    /// Colors of a chip in the normal state.
    pub fn normal(appearance: &Appearance) -> Self {
        Self {
            background: appearance.tag_background_color,
            border: appearance.border_color,
            text: appearance.text_color,
        }
    }
}

/// Resolve the colors for `state`, starting from the colors in effect.
///
/// A highlighted chip only changes background when a highlighted background
/// is configured; otherwise `current.background` is kept as is.
pub fn resolve_colors(appearance: &Appearance, state: ChipState, current: ChipColors) -> ChipColors {
    match state {
        ChipState::Highlighted => ChipColors {
            background: appearance
                .tag_highlighted_background_color
                .unwrap_or(current.background),
            border: appearance.highlighted_border_color.or(appearance.border_color),
            text: appearance.highlighted_text_color,
        },
        ChipState::Selected => ChipColors {
            background: appearance
                .tag_selected_background_color
                .unwrap_or(appearance.tag_background_color),
            border: appearance.selected_border_color.or(appearance.border_color),
            text: appearance.selected_text_color,
        },
        ChipState::Normal => ChipColors::normal(appearance),
    }
}

/// What a tap on a chip asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipIntent {
    /// The chip body was tapped.
    Tapped,
    /// The remove affordance was tapped.
    RemoveTapped,
}

/// One tag in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct Chip {
    /// Position in the current layout. Reassigned on every reload.
    index: usize,
    title: String,
    selected: bool,
    highlighted: bool,
    remove_enabled: bool,
    /// Hidden while a drag snapshot stands in for it.
    hidden: bool,
    frame: Rect,
    intrinsic_size: Size,
    colors: ChipColors,
}

impl Chip {
    /// Create an unselected, unhighlighted chip.
    pub fn new(index: usize, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            selected: false,
            highlighted: false,
            remove_enabled: false,
            hidden: false,
            frame: Rect::ZERO,
            intrinsic_size: Size::default(),
            colors: ChipColors::normal(&Appearance::default()),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn remove_enabled(&self) -> bool {
        self.remove_enabled
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn intrinsic_size(&self) -> Size {
        self.intrinsic_size
    }

    pub fn colors(&self) -> ChipColors {
        self.colors
    }

    /// Override the applied colors until the next state change or restyle.
    pub fn set_colors(&mut self, colors: ChipColors) {
        self.colors = colors;
    }

    /// Current state, highlighted first.
    pub fn state(&self) -> ChipState {
        if self.highlighted {
            ChipState::Highlighted
        } else if self.selected {
            ChipState::Selected
        } else {
            ChipState::Normal
        }
    }

    pub fn set_selected(&mut self, selected: bool, appearance: &Appearance) {
        self.selected = selected;
        self.restyle(appearance);
    }

    pub fn set_highlighted(&mut self, highlighted: bool, appearance: &Appearance) {
        self.highlighted = highlighted;
        self.restyle(appearance);
    }

    pub(crate) fn set_remove_enabled(&mut self, enabled: bool) {
        self.remove_enabled = enabled;
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub(crate) fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    /// Re-resolve colors for the current state.
    pub fn restyle(&mut self, appearance: &Appearance) {
        self.colors = resolve_colors(appearance, self.state(), self.colors);
    }

    /// Recompute the intrinsic size and return it.
    pub fn measure(&mut self, measure: &dyn TextMeasure, metrics: &Metrics) -> Size {
        self.intrinsic_size = intrinsic_size(&self.title, measure, metrics, self.remove_enabled);
        self.intrinsic_size
    }

    /// Intent of a tap at `point`, none when the point is outside the chip.
    pub fn intent_at(&self, point: Point, remove_affordance_width: f64) -> Option<ChipIntent> {
        if !self.frame.contains(point) {
            return None;
        }
        if self.remove_enabled && point.x >= self.frame.right() - remove_affordance_width {
            Some(ChipIntent::RemoveTapped)
        } else {
            Some(ChipIntent::Tapped)
        }
    }

    /// Draw the chip into `area` of the buffer.
    pub fn render(&self, area: CellRect, buf: &mut Buffer, metrics: &Metrics, appearance: &Appearance) {
        if area.is_empty() {
            return;
        }
        let style = Style::default().fg(self.colors.text).bg(self.colors.background);
        buf.set_style(area, style);

        let pad = " ".repeat(metrics.horizontal_padding.round() as usize);
        let mut spans = vec![Span::raw(pad.clone()), Span::raw(self.title.clone()), Span::raw(pad)];
        if self.remove_enabled {
            spans.push(Span::raw(REMOVE_GLYPH));
        }

        let text_row = area.y + (metrics.vertical_padding.round() as u16).min(area.height - 1);
        let line_area = CellRect::new(area.x, text_row, area.width, 1);
        Paragraph::new(Line::from(spans)).style(style).render(line_area, buf);

        if appearance.border_width > 0.0 && area.width >= 2 {
            let border_style = Style::default()
                .fg(self.colors.border.unwrap_or(self.colors.text))
                .bg(self.colors.background);
            for y in area.top()..area.bottom() {
                buf[(area.left(), y)].set_symbol("▏").set_style(border_style);
                buf[(area.right() - 1, y)].set_symbol("▕").set_style(border_style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appearance() -> Appearance {
        Appearance {
            tag_background_color: Color::Blue,
            tag_selected_background_color: Some(Color::Cyan),
            tag_highlighted_background_color: Some(Color::Red),
            text_color: Color::White,
            selected_text_color: Color::Black,
            highlighted_text_color: Color::Yellow,
            border_color: Some(Color::Gray),
            selected_border_color: Some(Color::Green),
            ..Appearance::default()
        }
    }

    #[test]
    fn test_intrinsic_size_without_remove() {
        let metrics = Metrics::default();
        let size = intrinsic_size("tag", &CellMeasure, &metrics, false);
        assert_eq!(size.height, 12.0 + 2.0 * 2.0);
        assert_eq!(size.width, 3.0 * 7.0 + 2.0 * 5.0);
    }

    #[test]
    fn test_intrinsic_size_with_remove() {
        let metrics = Metrics::default();
        let plain = intrinsic_size("tag", &CellMeasure, &metrics, false);
        let removable = intrinsic_size("tag", &CellMeasure, &metrics, true);
        assert_eq!(removable.width - plain.width, 24.0);
        assert_eq!(removable.height, plain.height);
    }

    #[test]
    fn test_measure_uses_display_width() {
        let font = Font::cell();
        assert_eq!(CellMeasure.text_width("日本", &font), 4.0);
        assert_eq!(CellMeasure.text_width("ab", &font), 2.0);
    }

    #[test]
    fn test_state_priority() {
        let appearance = appearance();
        let mut chip = Chip::new(0, "a");
        assert_eq!(chip.state(), ChipState::Normal);

        chip.set_selected(true, &appearance);
        assert_eq!(chip.state(), ChipState::Selected);

        chip.set_highlighted(true, &appearance);
        assert_eq!(chip.state(), ChipState::Highlighted);

        chip.set_highlighted(false, &appearance);
        assert_eq!(chip.state(), ChipState::Selected);
    }

    #[test]
    fn test_resolve_selected_colors() {
        let appearance = appearance();
        let colors = resolve_colors(&appearance, ChipState::Selected, ChipColors::normal(&appearance));
        assert_eq!(colors.background, Color::Cyan);
        assert_eq!(colors.border, Some(Color::Green));
        assert_eq!(colors.text, Color::Black);
    }

    #[test]
    fn test_selected_background_falls_back() {
        let appearance = Appearance {
            tag_selected_background_color: None,
            ..appearance()
        };
        let colors = resolve_colors(&appearance, ChipState::Selected, ChipColors::normal(&appearance));
        assert_eq!(colors.background, Color::Blue);
    }

    #[test]
    fn test_highlighted_background_does_not_fall_back() {
        let appearance = Appearance {
            tag_highlighted_background_color: None,
            ..appearance()
        };
        let mut chip = Chip::new(0, "a");
        chip.set_selected(true, &appearance);
        assert_eq!(chip.colors().background, Color::Cyan);

        // Highlighting keeps whatever background was in effect.
        chip.set_highlighted(true, &appearance);
        assert_eq!(chip.colors().background, Color::Cyan);
        assert_eq!(chip.colors().text, Color::Yellow);
    }

    #[test]
    fn test_highlighted_background_applied_when_configured() {
        let appearance = appearance();
        let mut chip = Chip::new(0, "a");
        chip.set_highlighted(true, &appearance);
        assert_eq!(chip.colors().background, Color::Red);
    }

    #[test]
    fn test_intent_at() {
        let mut chip = Chip::new(0, "tag");
        chip.set_frame(Rect::new(10.0, 0.0, 30.0, 10.0));
        assert_eq!(chip.intent_at(Point::new(5.0, 5.0), 8.0), None);
        assert_eq!(chip.intent_at(Point::new(35.0, 5.0), 8.0), Some(ChipIntent::Tapped));

        chip.set_remove_enabled(true);
        assert_eq!(chip.intent_at(Point::new(35.0, 5.0), 8.0), Some(ChipIntent::RemoveTapped));
        assert_eq!(chip.intent_at(Point::new(20.0, 5.0), 8.0), Some(ChipIntent::Tapped));
    }

    #[test]
    fn test_render_title() {
        let metrics = Metrics::terminal();
        let appearance = appearance();
        let mut chip = Chip::new(0, "bug");
        chip.restyle(&appearance);

        let area = CellRect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        chip.render(area, &mut buf, &metrics, &appearance);

        assert_eq!(buf[(1, 0)].symbol(), "b");
        assert_eq!(buf[(3, 0)].symbol(), "g");
        assert_eq!(buf[(0, 0)].bg, Color::Blue);
    }
}
