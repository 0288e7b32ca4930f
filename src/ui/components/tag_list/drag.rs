//! Drag-to-reorder.
//!
//! A drag moves through `Began -> Changed* -> Ended | Cancelled`. While it is
//! active the dragged chip is hidden and a floating copy follows the pointer.
//! Every time the pointer crosses into another chip the data source is asked
//! to move the item and the list reloads, so the tracked index always names
//! the slot the dragged tag currently occupies.
//!
//! Moves applied during a drag stay applied when it is cancelled, unless
//! `Behavior::rollback_cancelled_drag` is set.

use tracing::{debug, trace};

use super::TagListView;
use crate::layout::{Point, Rect};
use crate::ui::components::chip::Chip;

/// Phase of a drag gesture as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// Effect of feeding one phase to the tag list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// Nothing happened: no drag to start, or none in progress.
    Ignored,
    /// A drag started on the chip at `index`.
    Started { index: usize },
    /// The snapshot moved without changing the order.
    Tracking,
    /// The tag moved from `from` to `to` in the data source.
    Moved { from: usize, to: usize },
    /// The drag finished with the tag resting at `index`, drawn at `frame`.
    Settled { index: usize, frame: Rect },
}

/// State of an active drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    origin_index: usize,
    tracked_index: usize,
    snapshot: Chip,
}

impl DragSession {
    /// Index the drag started from.
    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    /// Index the dragged tag occupies now.
    pub fn tracked_index(&self) -> usize {
        self.tracked_index
    }

    /// Floating copy of the dragged chip, positioned under the pointer.
    pub fn snapshot(&self) -> &Chip {
        &self.snapshot
    }
}

impl TagListView {
    /// Feed one phase of a drag gesture at `location`.
    pub fn drag(&mut self, phase: DragPhase, location: Point) -> DragOutcome {
        match phase {
            DragPhase::Began => self.begin_drag(location),
            DragPhase::Changed => self.update_drag(location),
            DragPhase::Ended | DragPhase::Cancelled => {
                self.finish_drag(phase == DragPhase::Cancelled)
            }
        }
    }

    fn begin_drag(&mut self, location: Point) -> DragOutcome {
        if self.drag.is_some() || !self.config.behavior.allows_reordering {
            return DragOutcome::Ignored;
        }
        let Some(index) = self.index_at(location) else {
            return DragOutcome::Ignored;
        };
        let movable = self
            .data_source
            .as_ref()
            .is_some_and(|source| source.borrow().can_move(index));
        if !movable {
            trace!(index, "Tag cannot move");
            return DragOutcome::Ignored;
        }

        let mut snapshot = self.chips[index].clone();
        snapshot.set_frame(snapshot.frame().centered_on(location));
        self.chips[index].set_hidden(true);
        self.drag = Some(DragSession {
            origin_index: index,
            tracked_index: index,
            snapshot,
        });
        debug!(index, "Drag started");
        DragOutcome::Started { index }
    }

    fn update_drag(&mut self, location: Point) -> DragOutcome {
        let Some(session) = self.drag.as_mut() else {
            return DragOutcome::Ignored;
        };
        let frame = session.snapshot.frame().centered_on(location);
        session.snapshot.set_frame(frame);
        let from = session.tracked_index;

        let Some(candidate) = self.index_at(location) else {
            return DragOutcome::Tracking;
        };
        if candidate == from {
            return DragOutcome::Tracking;
        }

        let to = self
            .delegate
            .as_ref()
            .and_then(|delegate| delegate.borrow_mut().remap_destination(from, candidate))
            .unwrap_or(candidate);
        self.check_index(to);

        // Track the new slot before reloading so the rebuilt chip stays hidden.
        if let Some(session) = self.drag.as_mut() {
            session.tracked_index = to;
        }
        self.move_tag(from, to);
        DragOutcome::Moved { from, to }
    }

    fn finish_drag(&mut self, cancelled: bool) -> DragOutcome {
        let Some(session) = self.drag.take() else {
            return DragOutcome::Ignored;
        };

        let mut index = session.tracked_index;
        if cancelled && self.config.behavior.rollback_cancelled_drag && index != session.origin_index {
            debug!(from = index, to = session.origin_index, "Rolling back cancelled drag");
            self.move_tag(index, session.origin_index);
            index = session.origin_index;
        }

        let frame = match self.chips.get_mut(index) {
            Some(chip) => {
                chip.set_hidden(false);
                chip.frame()
            }
            None => Rect::ZERO,
        };
        debug!(index, cancelled, "Drag finished");
        DragOutcome::Settled { index, frame }
    }

    /// Drop an active drag without settling it.
    pub(super) fn abandon_drag(&mut self) {
        if let Some(session) = self.drag.take() {
            if let Some(chip) = self.chips.get_mut(session.tracked_index) {
                chip.set_hidden(false);
            }
        }
    }
}
