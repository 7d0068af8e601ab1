use crate::scroll::ScrollRequester;
use crate::topology::{self, Direction};

/// Result of a directional move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Focus moved to the contained index.
    Moved(usize),
    /// A valid focus existed but the move would leave the grid; absorbed.
    Absorbed,
    /// No focus was held; nothing to move.
    NoFocus,
}

/// Owns the focused index and enforces its bounds invariant: a held index is
/// always inside `[0, item_count)` for the counts it was last validated
/// against. Every successful focus change requests a scroll-into-view.
pub struct FocusController {
    focused: Option<usize>,
    scroll: ScrollRequester,
}

impl FocusController {
    pub fn new(scroll: ScrollRequester) -> Self {
        Self {
            focused: None,
            scroll,
        }
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Set focus to `index`. Out-of-bounds indices are absorbed; returns
    /// whether focus was actually set.
    pub fn set_focus(&mut self, index: usize, item_count: usize) -> bool {
        if index >= item_count {
            return false;
        }
        self.focused = Some(index);
        self.scroll.reveal(index);
        true
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// Move focus one step. No-op without a current focus; edge moves are
    /// absorbed, leaving focus unchanged.
    pub fn move_focus(
        &mut self,
        direction: Direction,
        item_count: usize,
        column_count: usize,
    ) -> MoveOutcome {
        let Some(current) = self.focused else {
            return MoveOutcome::NoFocus;
        };
        match topology::neighbor(current, direction, item_count, column_count) {
            Some(next) => {
                self.focused = Some(next);
                self.scroll.reveal(next);
                MoveOutcome::Moved(next)
            }
            None => MoveOutcome::Absorbed,
        }
    }

    /// Claim focus at index 0 when no focus exists and the list is
    /// non-empty. Idempotent: an existing focus is left alone.
    pub fn claim_initial(&mut self, item_count: usize) -> bool {
        if self.focused.is_some() || item_count == 0 {
            return false;
        }
        self.set_focus(0, item_count)
    }

    /// Release focus when the held index no longer fits the sequence.
    /// Returns whether focus was released.
    pub fn release_out_of_bounds(&mut self, item_count: usize) -> bool {
        match self.focused {
            Some(index) if index >= item_count => {
                self.focused = None;
                true
            }
            _ => false,
        }
    }

    pub fn last_reveal(&self) -> Option<usize> {
        self.scroll.last_requested()
    }
}
