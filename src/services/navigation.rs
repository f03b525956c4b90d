use crate::services::filter::ActiveSet;
use rand::Rng;

/// Position within the active set.
///
/// Invariant: `index < active.len()` whenever the active set is non-empty. With an
/// empty active set every movement is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionNavigator {
    active: ActiveSet,
    index: usize,
}

impl SessionNavigator {
    pub fn new(active: ActiveSet) -> Self {
        Self { active, index: 0 }
    }

    /// Replace the active set and go back to its first entry.
    pub fn set_active_set(&mut self, active: ActiveSet) {
        self.active = active;
        self.index = 0;
    }

    pub fn active_set(&self) -> &ActiveSet {
        &self.active
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Vocabulary position of the current entry.
    pub fn current(&self) -> Option<usize> {
        self.active.get(self.index)
    }

    /// 1-based position and total, for the card counter.
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.is_empty() {
            None
        } else {
            Some((self.index + 1, self.len()))
        }
    }

    /// Move forward, wrapping to the start. Returns whether the set is non-empty.
    pub fn next(&mut self) -> bool {
        let len = self.len();
        if len == 0 {
            return false;
        }
        self.index = (self.index + 1) % len;
        true
    }

    /// Move backward, wrapping to the end. Returns whether the set is non-empty.
    pub fn prev(&mut self) -> bool {
        let len = self.len();
        if len == 0 {
            return false;
        }
        self.index = (self.index + len - 1) % len;
        true
    }

    /// Jump to a uniformly drawn index other than the current one.
    ///
    /// Draws from the `len - 1` other slots and skips over the current index, so no
    /// retry loop is needed. Does nothing with fewer than two entries.
    pub fn random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let len = self.len();
        if len < 2 {
            return false;
        }
        let draw = rng.gen_range(0..len - 1);
        self.index = if draw >= self.index { draw + 1 } else { draw };
        true
    }
}
