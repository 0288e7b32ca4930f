//! Recording collaborator for tag list tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::{TagListDataSource, TagListDelegate, TagListView};
use crate::config::Config;
use crate::layout::Point;
use crate::ui::components::chip::Chip;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    WillSelect(usize),
    DidSelect(usize),
    WillDeselect(usize),
    DidDeselect(usize),
    WillBeginEditing(usize),
    DidDelete(usize),
    DidEndEditing(usize),
    DidAdd(String),
    Remap(usize, usize),
}

/// A backing store that is both data source and delegate, like most hosts.
#[derive(Debug, Default)]
pub struct Host {
    pub tags: Vec<String>,
    pub editable: HashSet<usize>,
    pub movable: HashSet<usize>,
    pub missing_titles: HashSet<usize>,
    pub select_redirect: HashMap<usize, usize>,
    pub deselect_redirect: HashMap<usize, usize>,
    pub remap_to: Option<usize>,
    pub summary: Option<String>,
    pub display_prefix: Option<String>,
    pub events: Vec<HostEvent>,
    pub moves: Vec<(usize, usize)>,
    pub clear_calls: usize,
    /// Calls to `count`, one per reload.
    pub count_calls: Cell<usize>,
}

impl TagListDataSource for Host {
    fn count(&self) -> usize {
        self.count_calls.set(self.count_calls.get() + 1);
        self.tags.len()
    }

    fn title_for(&self, index: usize) -> Option<String> {
        if self.missing_titles.contains(&index) {
            return None;
        }
        self.tags.get(index).cloned()
    }

    fn can_edit(&self, index: usize) -> bool {
        self.editable.contains(&index)
    }

    fn can_move(&self, index: usize) -> bool {
        self.movable.contains(&index)
    }

    fn move_item(&mut self, from: usize, to: usize) {
        self.moves.push((from, to));
        let tag = self.tags.remove(from);
        self.tags.insert(to, tag);
    }

    fn collapsed_summary_text(&self) -> Option<String> {
        self.summary.clone()
    }

    fn clear_all(&mut self) {
        self.clear_calls += 1;
        self.tags.clear();
    }
}

impl TagListDelegate for Host {
    fn will_select(&mut self, index: usize) -> usize {
        self.events.push(HostEvent::WillSelect(index));
        self.select_redirect.get(&index).copied().unwrap_or(index)
    }

    fn did_select(&mut self, index: usize) {
        self.events.push(HostEvent::DidSelect(index));
    }

    fn will_deselect(&mut self, index: usize) -> usize {
        self.events.push(HostEvent::WillDeselect(index));
        self.deselect_redirect.get(&index).copied().unwrap_or(index)
    }

    fn did_deselect(&mut self, index: usize) {
        self.events.push(HostEvent::DidDeselect(index));
    }

    fn will_begin_editing(&mut self, index: usize) {
        self.events.push(HostEvent::WillBeginEditing(index));
    }

    fn did_end_editing(&mut self, index: usize) {
        self.events.push(HostEvent::DidEndEditing(index));
    }

    fn did_delete(&mut self, index: usize) {
        self.events.push(HostEvent::DidDelete(index));
        self.tags.remove(index);
    }

    fn did_add_tag(&mut self, title: &str) {
        self.events.push(HostEvent::DidAdd(title.to_string()));
        self.tags.push(title.to_string());
    }

    fn remap_destination(&mut self, from: usize, to: usize) -> Option<usize> {
        self.events.push(HostEvent::Remap(from, to));
        self.remap_to
    }

    fn will_display(&mut self, chip: &Chip) -> Option<Chip> {
        let prefix = self.display_prefix.as_ref()?;
        let mut replacement = chip.clone();
        replacement.set_title(format!("{prefix}{}", chip.title()));
        Some(replacement)
    }
}

pub fn host(titles: &[&str]) -> Rc<RefCell<Host>> {
    Rc::new(RefCell::new(Host {
        tags: titles.iter().map(|title| title.to_string()).collect(),
        ..Host::default()
    }))
}

/// A one-row terminal-sized tag list.
pub fn terminal_view(width: f64) -> TagListView {
    TagListView::new(Config::terminal(), width, 1.0)
}

/// Center of the chip at `index`.
pub fn chip_point(view: &TagListView, index: usize) -> Point {
    view.chips()[index].frame().center()
}
