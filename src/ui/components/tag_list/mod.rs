//! Tag list coordinator.
//!
//! [`TagListView`] pulls tags from a [`TagListDataSource`], builds one [`Chip`]
//! per tag, lays the chips out with [`flow_layout`] and turns taps, keys and
//! drags into state changes or [`TagListDelegate`] notifications. It never
//! changes tag data itself. Structural changes go through a collaborator and
//! are observed by the next [`reload_data`](TagListView::reload_data).

mod drag;
mod render;
mod source;
#[cfg(test)]
mod test_support;

pub use drag::{DragOutcome, DragPhase, DragSession};
pub use source::{SharedDataSource, SharedDelegate, TagListDataSource, TagListDelegate};

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace, warn};

use crate::config::{Appearance, Behavior, Config, Metrics};
use crate::layout::{
    flow_layout, input_field_frame, ContainerGeometry, FlowParams, LayoutResult, Point, Rect, Size,
};

use super::backspace_input::{BackspaceInput, InputOutcome};
use super::chip::{CellMeasure, Chip, ChipIntent, TextMeasure};

/// Interaction mode derived from the behavior flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Taps select and deselect.
    Browsing,
    /// Taps delete; the input field and drag are available.
    Editable,
    /// A single summary label replaces the chips.
    Collapsed,
}

/// Which input currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    None,
    /// The visible text field after the last chip.
    Input,
    /// The invisible backspace trap, used while a chip is highlighted.
    Trap,
}

/// What a tap at a point resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapTarget {
    Nothing,
    /// The collapsed label was tapped and the list expanded.
    Expanded,
    /// The clear affordance was tapped.
    Clear,
    /// The input field was tapped and focused.
    Input,
    Chip { index: usize, intent: ChipIntent },
}

/// A flow-laid-out list of tag chips.
pub struct TagListView {
    config: Config,
    measure: Box<dyn TextMeasure>,
    data_source: Option<SharedDataSource>,
    delegate: Option<SharedDelegate>,
    chips: Vec<Chip>,
    layout: LayoutResult,
    geometry: ContainerGeometry,
    input: BackspaceInput,
    trap: BackspaceInput,
    focus: Focus,
    prefix_frame: Option<Rect>,
    input_frame: Option<Rect>,
    clear_frame: Option<Rect>,
    collapsed_frame: Option<Rect>,
    collapsed_text: String,
    drag: Option<DragSession>,
}

impl fmt::Debug for TagListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagListView")
            .field("mode", &self.mode())
            .field("chips", &self.chips)
            .field("geometry", &self.geometry)
            .field("focus", &self.focus)
            .field("has_data_source", &self.data_source.is_some())
            .field("has_delegate", &self.delegate.is_some())
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl TagListView {
    /// Create an empty tag list of the given size, measuring text in cells.
    pub fn new(config: Config, width: f64, height: f64) -> Self {
        Self::with_measure(config, width, height, Box::new(CellMeasure))
    }

    /// Create an empty tag list with a custom text measure.
    ///
    /// Behavior flags are taken from `config` as they are; the cascade of
    /// [`set_editable`](Self::set_editable) only applies to later changes.
    pub fn with_measure(
        config: Config,
        width: f64,
        height: f64,
        measure: Box<dyn TextMeasure>,
    ) -> Self {
        let geometry = ContainerGeometry::new(width, height, config.metrics.max_height);
        let collapsed_text = config.appearance.collapsed_placeholder.clone();
        let mut input = BackspaceInput::new();
        input.set_placeholder("add tag");
        let mut view = Self {
            config,
            measure,
            data_source: None,
            delegate: None,
            chips: Vec::new(),
            layout: LayoutResult::default(),
            geometry,
            input,
            trap: BackspaceInput::invisible(),
            focus: Focus::None,
            prefix_frame: None,
            input_frame: None,
            clear_frame: None,
            collapsed_frame: None,
            collapsed_text,
            drag: None,
        };
        view.rearrange(true);
        view.update_focus();
        view
    }

    // Collaborators

    /// Register the data source and reload from it.
    pub fn set_data_source(&mut self, source: Option<SharedDataSource>) {
        self.data_source = source;
        self.reload_data();
    }

    pub fn set_delegate(&mut self, delegate: Option<SharedDelegate>) {
        self.delegate = delegate;
    }

    fn notify(&self, f: impl FnOnce(&mut dyn TagListDelegate)) {
        if let Some(delegate) = &self.delegate {
            f(&mut *delegate.borrow_mut());
        }
    }

    // Accessors

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn appearance(&self) -> &Appearance {
        &self.config.appearance
    }

    pub fn metrics(&self) -> &Metrics {
        &self.config.metrics
    }

    pub fn behavior(&self) -> &Behavior {
        &self.config.behavior
    }

    pub fn mode(&self) -> Mode {
        let behavior = &self.config.behavior;
        if behavior.collapsed {
            Mode::Collapsed
        } else if behavior.editable {
            Mode::Editable
        } else {
            Mode::Browsing
        }
    }

    pub fn is_editable(&self) -> bool {
        self.config.behavior.editable
    }

    pub fn is_collapsed(&self) -> bool {
        self.config.behavior.collapsed
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    pub fn chip(&self, index: usize) -> Option<&Chip> {
        self.chips.get(index)
    }

    pub fn tag_count(&self) -> usize {
        self.chips.len()
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    pub fn geometry(&self) -> &ContainerGeometry {
        &self.geometry
    }

    pub fn current_height(&self) -> f64 {
        self.geometry.current_height
    }

    pub fn row_count(&self) -> usize {
        self.layout.row_count
    }

    /// Height of the chip rows alone, without margins or the input field.
    pub fn intrinsic_content_height(&self) -> f64 {
        let rows = self.layout.row_count as f64;
        if rows == 0.0 {
            return 0.0;
        }
        let margin = self.config.metrics.vertical_margin;
        rows * (self.layout.row_height + margin) - margin
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn input(&self) -> &BackspaceInput {
        &self.input
    }

    pub fn prefix_frame(&self) -> Option<Rect> {
        self.prefix_frame
    }

    pub fn input_frame(&self) -> Option<Rect> {
        self.input_frame
    }

    pub fn clear_frame(&self) -> Option<Rect> {
        self.clear_frame
    }

    pub fn collapsed_frame(&self) -> Option<Rect> {
        self.collapsed_frame
    }

    /// Text of the collapsed label, valid while collapsed.
    pub fn collapsed_text(&self) -> &str {
        &self.collapsed_text
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Index of the chip whose frame contains `point`.
    pub fn index_at(&self, point: Point) -> Option<usize> {
        if self.is_collapsed() {
            return None;
        }
        self.chips.iter().position(|chip| chip.frame().contains(point))
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.chips.len(),
            "tag index {index} out of range for {} tags",
            self.chips.len()
        );
    }

    // Reload and layout

    /// Rebuild every chip from the data source and relayout.
    ///
    /// Does nothing while no data source is registered.
    pub fn reload_data(&mut self) {
        let Some(source) = self.data_source.clone() else {
            trace!("Reload skipped, no data source");
            return;
        };
        let titles: Vec<String> = {
            let source = source.borrow();
            (0..source.count())
                .map(|index| source.title_for(index).unwrap_or_default())
                .collect()
        };

        self.chips.clear();
        for (index, title) in titles.into_iter().enumerate() {
            let mut chip = Chip::new(index, title);
            chip.restyle(&self.config.appearance);
            if let Some(delegate) = &self.delegate {
                if let Some(mut replacement) = delegate.borrow_mut().will_display(&chip) {
                    replacement.set_index(index);
                    chip = replacement;
                }
            }
            self.chips.push(chip);
        }

        if let Some(session) = &self.drag {
            if let Some(chip) = self.chips.get_mut(session.tracked_index()) {
                chip.set_hidden(true);
            }
        }
        self.input.clear();
        debug!(count = self.chips.len(), "Reloaded tags");

        self.rearrange(true);
        self.update_focus();
    }

    /// Recompute every frame and renegotiate the container height.
    pub fn relayout(&mut self) {
        self.rearrange(true);
    }

    /// Re-resolve every chip's colors from the current appearance.
    pub fn restyle(&mut self) {
        for chip in &mut self.chips {
            chip.restyle(&self.config.appearance);
        }
    }

    /// Change the container width and relayout.
    pub fn resize(&mut self, width: f64) {
        if self.geometry.width == width {
            return;
        }
        trace!(width, "Tag list resized");
        self.geometry.width = width;
        self.rearrange(true);
    }

    fn rearrange(&mut self, adjust_height: bool) {
        let metrics = self.config.metrics;
        self.prefix_frame = self.prefix_label_frame(&metrics);
        let leading = self
            .prefix_frame
            .map_or(0.0, |frame| frame.right() + metrics.horizontal_margin);

        if self.is_collapsed() {
            self.layout_collapsed(leading);
            return;
        }
        self.collapsed_frame = None;

        let behavior = self.config.behavior;
        let removal = behavior.editable && behavior.allows_removal;
        let creation = behavior.editable && behavior.allows_creation;

        let removable: Vec<bool> = match &self.data_source {
            Some(source) if removal => {
                let source = source.borrow();
                (0..self.chips.len()).map(|index| source.can_edit(index)).collect()
            }
            _ => vec![false; self.chips.len()],
        };
        let measure = self.measure.as_ref();
        let sizes: Vec<Size> = self
            .chips
            .iter_mut()
            .zip(removable)
            .map(|(chip, enabled)| {
                chip.set_remove_enabled(enabled);
                chip.measure(measure, &metrics)
            })
            .collect();

        let params = FlowParams {
            container_width: self.geometry.width,
            leading_reserved: leading,
            trailing_reserved: if removal {
                metrics.clear_affordance_width
            } else {
                0.0
            },
            horizontal_gap: metrics.horizontal_margin,
            vertical_gap: metrics.vertical_margin,
            alignment: metrics.alignment,
        };
        self.layout = flow_layout(&sizes, &params);
        for (chip, frame) in self.chips.iter_mut().zip(&self.layout.frames) {
            chip.set_frame(*frame);
        }

        let mut content_y = self.layout.content_y;
        self.input_frame = if creation {
            let frame = input_field_frame(
                &self.layout,
                params.row_width(),
                metrics.min_input_width,
                metrics.tag_row_height,
                metrics.vertical_margin,
            );
            content_y = content_y.max(frame.y);
            Some(frame)
        } else {
            None
        };

        if adjust_height
            && self
                .geometry
                .negotiate(content_y, metrics.tag_row_height, metrics.vertical_margin)
        {
            debug!(height = self.geometry.current_height, "Container height changed");
        }

        let geometry = self.geometry;
        self.clear_frame = removal.then(|| {
            let width = metrics.clear_affordance_width;
            let height = metrics.chip_height();
            Rect::new(
                geometry.width - width,
                ((geometry.current_height - height) / 2.0).max(0.0),
                width,
                height,
            )
        });

        trace!(
            chips = self.chips.len(),
            rows = self.layout.row_count,
            content_y,
            "Laid out tags"
        );
    }

    fn prefix_label_frame(&self, metrics: &Metrics) -> Option<Rect> {
        let label = self
            .config
            .appearance
            .prefix_label
            .as_deref()
            .filter(|label| !label.is_empty())?;
        let width = self.measure.text_width(label, &metrics.font);
        Some(Rect::new(0.0, 0.0, width, metrics.chip_height()))
    }

    fn layout_collapsed(&mut self, leading: f64) {
        self.input_frame = None;
        self.clear_frame = None;
        self.collapsed_text = self
            .data_source
            .as_ref()
            .and_then(|source| source.borrow().collapsed_summary_text())
            .unwrap_or_else(|| self.config.appearance.collapsed_placeholder.clone());
        self.collapsed_frame = Some(Rect::new(
            leading,
            0.0,
            (self.geometry.width - leading).max(0.0),
            self.geometry.current_height,
        ));
    }

    // Configuration

    /// Enter or leave editable mode.
    ///
    /// Entering clears every selection. Both directions clear every highlight
    /// and set creation, removal and reordering to `editable`.
    pub fn set_editable(&mut self, editable: bool) {
        if editable {
            self.deselect_all_tags();
        }
        for chip in &mut self.chips {
            chip.set_highlighted(false, &self.config.appearance);
        }
        let behavior = &mut self.config.behavior;
        behavior.editable = editable;
        behavior.allows_creation = editable;
        behavior.allows_removal = editable;
        behavior.allows_reordering = editable;
        debug!(editable, "Editable mode changed");

        self.rearrange(true);
        self.update_focus();
    }

    /// Swap the chips for the collapsed label, or bring them back.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        if collapsed {
            self.abandon_drag();
        }
        self.config.behavior.collapsed = collapsed;
        debug!(collapsed, "Collapsed state changed");
        self.rearrange(true);
        self.update_focus();
    }

    pub fn set_allows_multiple_selection(&mut self, allows: bool) {
        self.config.behavior.multiple_selection = allows;
    }

    pub fn set_allows_creation(&mut self, allows: bool) {
        self.config.behavior.allows_creation = allows;
        self.rearrange(true);
        self.update_focus();
    }

    pub fn set_allows_removal(&mut self, allows: bool) {
        self.config.behavior.allows_removal = allows;
        self.rearrange(true);
        self.update_focus();
    }

    pub fn set_allows_reordering(&mut self, allows: bool) {
        self.config.behavior.allows_reordering = allows;
        if !allows {
            self.abandon_drag();
        }
    }

    /// Move the data back when a drag is cancelled.
    pub fn set_rollback_cancelled_drag(&mut self, rollback: bool) {
        self.config.behavior.rollback_cancelled_drag = rollback;
    }

    /// Change the appearance, then restyle and relayout.
    pub fn update_appearance(&mut self, f: impl FnOnce(&mut Appearance)) {
        f(&mut self.config.appearance);
        self.restyle();
        self.rearrange(true);
    }

    /// Change the metrics, then relayout.
    pub fn update_metrics(&mut self, f: impl FnOnce(&mut Metrics)) {
        f(&mut self.config.metrics);
        if let Err(error) = self.config.metrics.validate() {
            warn!(error = %error, "Metrics out of range");
        }
        self.geometry.max_height = self.config.metrics.max_height;
        self.rearrange(true);
    }

    // Selection and highlight

    /// Select a chip, deselecting the others unless multiple selection is on.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn select_tag(&mut self, index: usize) {
        self.check_index(index);
        if !self.config.behavior.multiple_selection {
            self.deselect_all_tags();
        }
        self.chips[index].set_selected(true, &self.config.appearance);
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn deselect_tag(&mut self, index: usize) {
        self.check_index(index);
        self.chips[index].set_selected(false, &self.config.appearance);
    }

    pub fn deselect_all_tags(&mut self) {
        for chip in &mut self.chips {
            chip.set_selected(false, &self.config.appearance);
        }
    }

    /// Indices of the selected chips, ascending.
    pub fn selected_tags(&self) -> Vec<usize> {
        self.chips
            .iter()
            .filter(|chip| chip.is_selected())
            .map(Chip::index)
            .collect()
    }

    /// Arm a chip for deletion by backspace.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn highlight_tag(&mut self, index: usize) {
        self.check_index(index);
        if !self.config.behavior.multiple_selection {
            for chip in &mut self.chips {
                chip.set_highlighted(false, &self.config.appearance);
            }
        }
        self.chips[index].set_highlighted(true, &self.config.appearance);
        self.update_focus();
    }

    pub fn unhighlight_all_tags(&mut self) {
        for chip in &mut self.chips {
            chip.set_highlighted(false, &self.config.appearance);
        }
        self.update_focus();
    }

    pub fn highlighted_tags(&self) -> Vec<usize> {
        self.chips
            .iter()
            .filter(|chip| chip.is_highlighted())
            .map(Chip::index)
            .collect()
    }

    // Taps

    /// Handle a tap on the body of a chip.
    ///
    /// Browsing toggles selection through the veto hooks; editable mode asks
    /// to delete the chip.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn tap_tag(&mut self, index: usize) {
        self.check_index(index);
        match self.mode() {
            Mode::Collapsed => self.set_collapsed(false),
            Mode::Editable => self.remove_tag(index),
            Mode::Browsing => {
                if self.chips[index].is_selected() {
                    self.request_deselection(index);
                } else {
                    self.request_selection(index);
                }
            }
        }
    }

    /// Handle a tap on the remove affordance of a chip.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn tap_remove_button(&mut self, index: usize) {
        self.check_index(index);
        self.remove_tag(index);
    }

    /// Resolve a tap at `point` and act on it.
    pub fn tap_at(&mut self, point: Point) -> TapTarget {
        if self.is_collapsed() {
            self.set_collapsed(false);
            return TapTarget::Expanded;
        }
        if self.clear_frame.is_some_and(|frame| frame.contains(point)) {
            self.clear();
            return TapTarget::Clear;
        }

        let remove_width = self.config.metrics.remove_affordance_width;
        let hit = self.chips.iter().find_map(|chip| {
            chip.intent_at(point, remove_width)
                .map(|intent| (chip.index(), intent))
        });
        if let Some((index, intent)) = hit {
            match intent {
                ChipIntent::Tapped => self.tap_tag(index),
                ChipIntent::RemoveTapped => self.tap_remove_button(index),
            }
            return TapTarget::Chip { index, intent };
        }

        if self.input_frame.is_some_and(|frame| frame.contains(point)) {
            self.focus_input();
            return TapTarget::Input;
        }
        TapTarget::Nothing
    }

    fn request_selection(&mut self, index: usize) {
        let approved = self
            .delegate
            .as_ref()
            .map_or(index, |delegate| delegate.borrow_mut().will_select(index));
        if approved != index {
            debug!(index, "Selection vetoed");
            return;
        }
        self.select_tag(index);
        self.notify(|delegate| delegate.did_select(index));
    }

    fn request_deselection(&mut self, index: usize) {
        let approved = self
            .delegate
            .as_ref()
            .map_or(index, |delegate| delegate.borrow_mut().will_deselect(index));
        if approved != index {
            debug!(index, "Deselection vetoed");
            return;
        }
        self.deselect_tag(index);
        self.notify(|delegate| delegate.did_deselect(index));
    }

    /// Ask the collaborators to delete a tag, if the data source allows it.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_tag(&mut self, index: usize) {
        self.check_index(index);
        let allowed = self
            .data_source
            .as_ref()
            .is_some_and(|source| source.borrow().can_edit(index));
        if !allowed {
            debug!(index, "Removal not permitted");
            return;
        }
        self.delete_tag(index);
    }

    fn delete_tag(&mut self, index: usize) {
        debug!(index, "Deleting tag");
        self.notify(|delegate| delegate.will_begin_editing(index));
        self.notify(|delegate| delegate.did_delete(index));
        self.reload_data();
        self.notify(|delegate| delegate.did_end_editing(index));
    }

    /// Ask the data source to drop every tag, then reload.
    pub fn clear(&mut self) {
        if let Some(source) = &self.data_source {
            debug!("Clearing all tags");
            source.borrow_mut().clear_all();
        }
        self.reload_data();
    }

    /// Ask the data source to move a tag, then reload.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is out of range.
    pub fn move_tag(&mut self, from: usize, to: usize) {
        self.check_index(from);
        self.check_index(to);
        if from == to {
            return;
        }
        let Some(source) = &self.data_source else {
            return;
        };
        source.borrow_mut().move_item(from, to);
        debug!(from, to, "Moved tag");
        self.reload_data();
    }

    // Keyboard

    /// Give the text field focus, which clears every highlight.
    pub fn focus_input(&mut self) {
        if self.input_frame.is_none() {
            return;
        }
        for chip in &mut self.chips {
            chip.set_highlighted(false, &self.config.appearance);
        }
        self.focus = Focus::Input;
    }

    fn update_focus(&mut self) {
        let behavior = self.config.behavior;
        let highlighted = self.chips.iter().any(Chip::is_highlighted);
        self.focus = if !behavior.editable || behavior.collapsed {
            Focus::None
        } else if highlighted && behavior.allows_removal {
            Focus::Trap
        } else if behavior.allows_creation {
            Focus::Input
        } else if behavior.allows_removal {
            Focus::Trap
        } else {
            Focus::None
        };
    }

    /// Feed a key to whichever input has focus.
    ///
    /// Returns false when the key was not used.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.focus {
            Focus::None => false,
            Focus::Input => match self.input.handle_input(key) {
                InputOutcome::BackspaceOnEmpty => {
                    self.backspace_on_empty();
                    true
                }
                InputOutcome::Submitted(title) => {
                    self.submit_tag(title);
                    true
                }
                InputOutcome::Edited => true,
                InputOutcome::Unchanged => false,
            },
            Focus::Trap => match self.trap.handle_input(key) {
                InputOutcome::BackspaceOnEmpty => {
                    self.backspace_on_empty();
                    true
                }
                _ => self.redirect_to_input(key),
            },
        }
    }

    /// Typing while a chip is armed moves focus back to the text field.
    fn redirect_to_input(&mut self, key: KeyEvent) -> bool {
        let typing = matches!(key.code, KeyCode::Char(_))
            && matches!(key.modifiers, KeyModifiers::NONE | KeyModifiers::SHIFT);
        if !typing || self.input_frame.is_none() {
            return false;
        }
        self.focus_input();
        self.input.handle_input(key);
        true
    }

    /// Delete the highlighted chip, or arm the last one.
    ///
    /// The deletion skips the `can_edit` check that taps go through.
    fn backspace_on_empty(&mut self) {
        let highlighted = self.highlighted_tags();
        match highlighted.as_slice() {
            [index] => {
                let index = *index;
                debug!(index, "Deleting highlighted tag");
                self.notify(|delegate| delegate.did_delete(index));
                self.reload_data();
            }
            [] => {
                if let Some(last) = self.chips.last_mut() {
                    trace!(index = last.index(), "Arming last tag");
                    last.set_highlighted(true, &self.config.appearance);
                }
            }
            _ => debug!(count = highlighted.len(), "Several tags highlighted, not deleting"),
        }
        self.update_focus();
    }

    fn submit_tag(&mut self, title: String) {
        debug!(title = %title, "Adding tag");
        self.notify(|delegate| delegate.did_add_tag(&title));
        self.input.clear();
        self.reload_data();
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{chip_point, host, terminal_view, HostEvent};
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_reload_matches_data_source() {
        let host = host(&["alpha", "beta", "gamma"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host.clone()));

        assert_eq!(view.tag_count(), 3);
        for (index, chip) in view.chips().iter().enumerate() {
            assert_eq!(chip.index(), index);
            assert_eq!(chip.title(), host.borrow().tags[index]);
            assert!(!chip.is_selected());
            assert!(!chip.is_highlighted());
        }

        host.borrow_mut().tags.push("delta".to_string());
        view.reload_data();
        assert_eq!(view.tag_count(), 4);
        assert_eq!(view.chips()[3].title(), "delta");
    }

    #[test]
    fn test_reload_without_data_source_is_noop() {
        let mut view = terminal_view(60.0);
        view.reload_data();
        assert_eq!(view.tag_count(), 0);
        assert_eq!(view.row_count(), 0);
    }

    #[test]
    fn test_missing_title_is_empty() {
        let host = host(&["a", "b"]);
        host.borrow_mut().missing_titles.insert(1);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));
        assert_eq!(view.chips()[1].title(), "");
    }

    #[test]
    fn test_empty_list() {
        let host = host(&[]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));
        assert_eq!(view.tag_count(), 0);
        assert_eq!(view.row_count(), 0);
        assert_eq!(view.layout().content_height, 0.0);
        assert_eq!(view.intrinsic_content_height(), 0.0);
    }

    #[test]
    fn test_selection_exclusive_without_multi_select() {
        let host = host(&["a", "b", "c", "d"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));

        for index in [0, 2, 1, 3, 3, 0] {
            view.select_tag(index);
            assert_eq!(view.selected_tags(), vec![index]);
        }
    }

    #[test]
    fn test_multi_select_keeps_previous() {
        let host = host(&["a", "b", "c"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));
        view.set_allows_multiple_selection(true);

        view.select_tag(0);
        view.select_tag(2);
        assert_eq!(view.selected_tags(), vec![0, 2]);
        view.deselect_tag(0);
        assert_eq!(view.selected_tags(), vec![2]);
        view.deselect_all_tags();
        assert!(view.selected_tags().is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_select_out_of_range_panics() {
        let host = host(&["a"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));
        view.select_tag(1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_remove_out_of_range_panics() {
        let host = host(&["a"]);
        host.borrow_mut().editable = [5].into_iter().collect();
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host.clone()));
        view.set_delegate(Some(host));
        view.set_editable(true);
        view.remove_tag(5);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_move_out_of_range_panics() {
        let host = host(&["a", "b"]);
        host.borrow_mut().movable = [0].into_iter().collect();
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));
        view.move_tag(0, 2);
    }

    #[test]
    fn test_tap_selects_and_deselects() {
        let host = host(&["a", "b"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host.clone()));
        view.set_delegate(Some(host.clone()));

        view.tap_tag(1);
        assert_eq!(view.selected_tags(), vec![1]);
        view.tap_tag(1);
        assert!(view.selected_tags().is_empty());

        assert_eq!(
            host.borrow().events,
            vec![
                HostEvent::WillSelect(1),
                HostEvent::DidSelect(1),
                HostEvent::WillDeselect(1),
                HostEvent::DidDeselect(1),
            ]
        );
    }

    #[test]
    fn test_veto_blocks_selection() {
        let host = host(&["a", "b", "c"]);
        host.borrow_mut().select_redirect.insert(1, 2);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host.clone()));
        view.set_delegate(Some(host.clone()));

        view.select_tag(0);
        view.tap_tag(1);

        assert_eq!(view.selected_tags(), vec![0]);
        assert_eq!(host.borrow().events, vec![HostEvent::WillSelect(1)]);
    }

    #[test]
    fn test_veto_blocks_deselection() {
        let host = host(&["a", "b"]);
        host.borrow_mut().deselect_redirect.insert(0, 1);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host.clone()));
        view.set_delegate(Some(host.clone()));

        view.select_tag(0);
        view.tap_tag(0);
        assert_eq!(view.selected_tags(), vec![0]);
        assert!(!host.borrow().events.contains(&HostEvent::DidDeselect(0)));
    }

    #[test]
    fn test_deselection_happens_without_delegate() {
        let host = host(&["a", "b"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));

        view.tap_tag(0);
        assert_eq!(view.selected_tags(), vec![0]);
        view.tap_tag(0);
        assert!(view.selected_tags().is_empty());
    }

    #[test]
    fn test_set_editable_resets_transient_state() {
        let host = host(&["a", "b", "c"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));
        view.select_tag(1);
        view.highlight_tag(2);

        view.set_editable(true);
        assert_eq!(view.mode(), Mode::Editable);
        assert!(view.selected_tags().is_empty());
        assert!(view.highlighted_tags().is_empty());
        let behavior = view.behavior();
        assert!(behavior.allows_creation && behavior.allows_removal && behavior.allows_reordering);

        view.highlight_tag(0);
        view.set_editable(false);
        assert_eq!(view.mode(), Mode::Browsing);
        assert!(view.highlighted_tags().is_empty());
        assert!(!view.behavior().allows_creation);
        assert_eq!(view.focus(), Focus::None);
    }

    #[test]
    fn test_editable_tap_deletes_when_permitted() {
        let host = host(&["a", "b", "c"]);
        host.borrow_mut().editable = [0, 1, 2].into_iter().collect();
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host.clone()));
        view.set_delegate(Some(host.clone()));
        view.set_editable(true);

        view.tap_tag(1);

        assert_eq!(view.tag_count(), 2);
        assert_eq!(view.chips()[1].title(), "c");
        assert_eq!(
            host.borrow().events,
            vec![
                HostEvent::WillBeginEditing(1),
                HostEvent::DidDelete(1),
                HostEvent::DidEndEditing(1),
            ]
        );
    }

    #[test]
    fn test_editable_tap_denied_by_can_edit() {
        let host = host(&["a", "b", "c", "d"]);
        host.borrow_mut().editable = [0, 1, 2].into_iter().collect();
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host.clone()));
        view.set_delegate(Some(host.clone()));
        view.set_editable(true);
        let reloads = host.borrow().count_calls.get();

        view.tap_tag(3);

        assert_eq!(view.tag_count(), 4);
        assert!(host.borrow().events.is_empty());
        assert_eq!(host.borrow().count_calls.get(), reloads);
    }

    #[test]
    fn test_remove_affordance_follows_can_edit() {
        let host = host(&["a", "b"]);
        host.borrow_mut().editable = [1].into_iter().collect();
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));
        assert!(!view.chips()[1].remove_enabled());

        view.set_editable(true);
        assert!(!view.chips()[0].remove_enabled());
        assert!(view.chips()[1].remove_enabled());
        assert!(view.clear_frame().is_some());
    }

    #[test]
    fn test_backspace_arms_then_deletes_without_can_edit() {
        let host = host(&["a", "b", "c"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host.clone()));
        view.set_delegate(Some(host.clone()));
        view.set_editable(true);
        assert_eq!(view.focus(), Focus::Input);

        // Nothing highlighted: the first backspace only arms the last chip.
        assert!(view.handle_key(key(KeyCode::Backspace)));
        assert_eq!(view.highlighted_tags(), vec![2]);
        assert_eq!(view.tag_count(), 3);
        assert_eq!(view.focus(), Focus::Trap);

        // can_edit is false for every chip, yet backspace deletes.
        assert!(view.handle_key(key(KeyCode::Backspace)));
        assert_eq!(view.tag_count(), 2);
        assert_eq!(host.borrow().events, vec![HostEvent::DidDelete(2)]);
        assert!(view.highlighted_tags().is_empty());
        assert_eq!(view.focus(), Focus::Input);
    }

    #[test]
    fn test_backspace_with_text_only_edits() {
        let host = host(&["a"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));
        view.set_editable(true);

        view.handle_key(key(KeyCode::Char('x')));
        view.handle_key(key(KeyCode::Backspace));
        assert!(view.highlighted_tags().is_empty());
        assert_eq!(view.tag_count(), 1);
    }

    #[test]
    fn test_typing_on_armed_chip_returns_to_input() {
        let host = host(&["a", "b"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));
        view.set_editable(true);
        view.highlight_tag(0);
        assert_eq!(view.focus(), Focus::Trap);

        assert!(view.handle_key(key(KeyCode::Char('z'))));
        assert_eq!(view.focus(), Focus::Input);
        assert!(view.highlighted_tags().is_empty());
        assert_eq!(view.input().value(), "z");
    }

    #[test]
    fn test_enter_adds_tag() {
        let host = host(&["a"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host.clone()));
        view.set_delegate(Some(host.clone()));
        view.set_editable(true);

        for c in "new".chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
        assert!(view.handle_key(key(KeyCode::Enter)));

        assert_eq!(view.tag_count(), 2);
        assert_eq!(view.chips()[1].title(), "new");
        assert!(view.input().is_empty());
        assert!(host.borrow().events.contains(&HostEvent::DidAdd("new".to_string())));
    }

    #[test]
    fn test_keys_ignored_while_browsing() {
        let host = host(&["a"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));
        assert!(!view.handle_key(key(KeyCode::Backspace)));
        assert!(view.highlighted_tags().is_empty());
    }

    #[test]
    fn test_focus_input_clears_highlight() {
        let host = host(&["a", "b"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));
        view.set_editable(true);
        view.highlight_tag(1);
        view.focus_input();
        assert!(view.highlighted_tags().is_empty());
        assert_eq!(view.focus(), Focus::Input);
    }

    #[test]
    fn test_clear_asks_data_source() {
        let host = host(&["a", "b"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host.clone()));
        view.set_editable(true);

        let clear = view.clear_frame().expect("clear affordance");
        assert_eq!(view.tap_at(clear.center()), TapTarget::Clear);
        assert_eq!(view.tag_count(), 0);
        assert_eq!(host.borrow().clear_calls, 1);
    }

    #[test]
    fn test_collapse_and_tap_to_expand() {
        let host = host(&["a", "b"]);
        host.borrow_mut().summary = Some("2 tags".to_string());
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));

        view.set_collapsed(true);
        assert_eq!(view.mode(), Mode::Collapsed);
        assert_eq!(view.collapsed_text(), "2 tags");
        assert!(view.collapsed_frame().is_some());
        assert_eq!(view.index_at(chip_point(&view, 0)), None);

        assert_eq!(view.tap_at(Point::new(5.0, 0.0)), TapTarget::Expanded);
        assert!(!view.is_collapsed());
        assert!(view.collapsed_frame().is_none());
        assert_eq!(view.tag_count(), 2);
    }

    #[test]
    fn test_collapsed_placeholder_without_summary() {
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host(&["a"])));
        view.set_collapsed(true);
        assert_eq!(view.collapsed_text(), "Collapsed");
    }

    #[test]
    fn test_tap_at_routes_to_chip() {
        let host = host(&["alpha", "beta"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));

        let point = chip_point(&view, 1);
        assert_eq!(view.index_at(point), Some(1));
        assert_eq!(
            view.tap_at(point),
            TapTarget::Chip {
                index: 1,
                intent: ChipIntent::Tapped
            }
        );
        assert_eq!(view.selected_tags(), vec![1]);
        assert_eq!(view.tap_at(Point::new(59.0, 0.0)), TapTarget::Nothing);
    }

    #[test]
    fn test_tap_remove_affordance() {
        let host = host(&["alpha", "beta"]);
        host.borrow_mut().editable = [0, 1].into_iter().collect();
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host.clone()));
        view.set_delegate(Some(host.clone()));
        view.set_editable(true);

        let frame = view.chips()[0].frame();
        let target = view.tap_at(Point::new(frame.right() - 1.0, frame.y));
        assert_eq!(
            target,
            TapTarget::Chip {
                index: 0,
                intent: ChipIntent::RemoveTapped
            }
        );
        assert_eq!(view.tag_count(), 1);
        assert_eq!(view.chips()[0].title(), "beta");
    }

    #[test]
    fn test_prefix_label_reserves_leading_space() {
        let host = host(&["a"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));
        assert_eq!(view.chips()[0].frame().x, 0.0);

        view.update_appearance(|appearance| appearance.prefix_label = Some("Tags:".to_string()));
        let prefix = view.prefix_frame().expect("prefix frame");
        assert_eq!(prefix.width, 5.0);
        assert_eq!(view.chips()[0].frame().x, 6.0);
    }

    #[test]
    fn test_height_grows_and_shrinks_with_rows() {
        let tags: Vec<String> = (0..12).map(|i| format!("tag{i:02}")).collect();
        let titles: Vec<&str> = tags.iter().map(String::as_str).collect();
        let host = host(&titles);
        let mut view = terminal_view(20.0);
        view.set_data_source(Some(host.clone()));

        let tall = view.current_height();
        assert!(view.row_count() > 1);
        assert!(tall > 1.0);
        assert!(tall <= view.metrics().max_height);

        host.borrow_mut().tags.truncate(1);
        view.reload_data();
        assert_eq!(view.row_count(), 1);
        assert_eq!(view.current_height(), 1.0);
    }

    #[test]
    fn test_intrinsic_content_height() {
        let host = host(&["aaaaaaa", "bbbbbbb", "ccccccc"]);
        let mut view = terminal_view(20.0);
        view.set_data_source(Some(host));
        // Chips are nine cells wide; two fit per row.
        assert_eq!(view.row_count(), 2);
        assert_eq!(view.intrinsic_content_height(), 2.0);
    }

    #[test]
    fn test_resize_relayouts() {
        let host = host(&["aaaaaaa", "bbbbbbb", "ccccccc"]);
        let mut view = terminal_view(20.0);
        view.set_data_source(Some(host));
        assert_eq!(view.row_count(), 2);
        view.resize(40.0);
        assert_eq!(view.row_count(), 1);
    }

    #[test]
    fn test_will_display_can_replace_chip() {
        let host = host(&["a", "b"]);
        host.borrow_mut().display_prefix = Some("#".to_string());
        let mut view = terminal_view(60.0);
        view.set_delegate(Some(host.clone()));
        view.set_data_source(Some(host));
        assert_eq!(view.chips()[0].title(), "#a");
        assert_eq!(view.chips()[1].index(), 1);
    }

    #[test]
    fn test_input_field_follows_last_chip() {
        let host = host(&["a"]);
        let mut view = terminal_view(60.0);
        view.set_data_source(Some(host));
        assert!(view.input_frame().is_none());

        view.set_editable(true);
        let input = view.input_frame().expect("input frame");
        let chip = view.chips()[0].frame();
        assert_eq!(input.x, chip.right() + view.metrics().horizontal_margin);
        assert_eq!(input.y, chip.y);
        assert_eq!(view.tap_at(input.center()), TapTarget::Input);
    }
}
