//! Collaborator interfaces of the tag list.
//!
//! The tag list owns no tag data. It asks a [`TagListDataSource`] for the
//! tags on every reload and tells a [`TagListDelegate`] about user intent.
//! Every optional hook has a default so implementors only write what they
//! need. One type may implement both traits and be registered twice.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ui::components::chip::Chip;

/// Shared handle to a data source.
pub type SharedDataSource = Rc<RefCell<dyn TagListDataSource>>;

/// Shared handle to a delegate.
pub type SharedDelegate = Rc<RefCell<dyn TagListDelegate>>;

/// Supplies the tags shown by a tag list.
pub trait TagListDataSource {
    /// Number of tags. Called at the start of every reload.
    fn count(&self) -> usize;

    /// Title of the tag at `index`, called once per index in order.
    ///
    /// `None` shows an empty title.
    fn title_for(&self, index: usize) -> Option<String>;

    /// Whether the tag at `index` may be deleted.
    fn can_edit(&self, _index: usize) -> bool {
        false
    }

    /// Whether the tag at `index` may be dragged.
    fn can_move(&self, _index: usize) -> bool {
        false
    }

    /// Move the tag at `from` so that it ends up at `to`.
    fn move_item(&mut self, _from: usize, _to: usize) {}

    /// Text shown while the list is collapsed.
    fn collapsed_summary_text(&self) -> Option<String> {
        None
    }

    /// Remove every tag.
    fn clear_all(&mut self) {}
}

/// Receives user intent from a tag list.
///
/// `will_select` and `will_deselect` are veto hooks: returning the index
/// they were given lets the change through, anything else cancels it.
pub trait TagListDelegate {
    fn will_select(&mut self, index: usize) -> usize {
        index
    }

    fn did_select(&mut self, _index: usize) {}

    fn will_deselect(&mut self, index: usize) -> usize {
        index
    }

    fn did_deselect(&mut self, _index: usize) {}

    fn will_begin_editing(&mut self, _index: usize) {}

    fn did_end_editing(&mut self, _index: usize) {}

    /// The user asked to delete the tag at `index`.
    ///
    /// Remove it from the backing store here; the list reloads right after.
    fn did_delete(&mut self, _index: usize) {}

    /// The user entered a new tag.
    ///
    /// Add it to the backing store here; the list reloads right after.
    fn did_add_tag(&mut self, _title: &str) {}

    /// Replace the proposed destination of a drag move.
    fn remap_destination(&mut self, _from: usize, _to: usize) -> Option<usize> {
        None
    }

    /// Replace a freshly built chip before it is laid out.
    fn will_display(&mut self, _chip: &Chip) -> Option<Chip> {
        None
    }
}
