//! Colors and decoration.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Colors and decoration of chips and auxiliary labels.
///
/// Optional colors fall back as described on each field. The highlighted
/// background has no fallback: when unset, highlighting leaves the chip's
/// background as it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    /// Title color in the normal state.
    pub text_color: Color,
    /// Title color while selected.
    pub selected_text_color: Color,
    /// Title color while highlighted.
    pub highlighted_text_color: Color,

    /// Chip background in the normal state.
    pub tag_background_color: Color,
    /// Chip background while selected, falls back to `tag_background_color`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_selected_background_color: Option<Color>,
    /// Chip background while highlighted, no fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_highlighted_background_color: Option<Color>,

    /// Border color in the normal state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    /// Border color while selected, falls back to `border_color`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_border_color: Option<Color>,
    /// Border color while highlighted, falls back to `border_color`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_border_color: Option<Color>,
    pub border_width: f64,
    pub corner_radius: f64,

    pub shadow_color: Color,
    pub shadow_radius: f64,
    pub shadow_offset: (f64, f64),
    pub shadow_opacity: f64,

    /// Label shown before the first chip, none when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_label: Option<String>,
    pub prefix_label_text_color: Color,
    pub prefix_label_background_color: Color,

    /// Text of the input field.
    pub input_text_color: Color,
    /// Summary shown while collapsed when the data source has none.
    pub collapsed_placeholder: String,
    pub collapsed_text_color: Color,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            text_color: Color::White,
            selected_text_color: Color::Black,
            highlighted_text_color: Color::White,
            tag_background_color: Color::Blue,
            tag_selected_background_color: Some(Color::Cyan),
            tag_highlighted_background_color: Some(Color::Red),
            border_color: None,
            selected_border_color: None,
            highlighted_border_color: None,
            border_width: 0.0,
            corner_radius: 0.0,
            shadow_color: Color::Blue,
            shadow_radius: 0.0,
            shadow_offset: (-20.0, 0.0),
            shadow_opacity: 0.0,
            prefix_label: None,
            prefix_label_text_color: Color::White,
            prefix_label_background_color: Color::Reset,
            input_text_color: Color::Gray,
            collapsed_placeholder: "Collapsed".to_string(),
            collapsed_text_color: Color::Green,
        }
    }
}
