//! Undo/redo over form snapshots.

use std::collections::VecDeque;

/// Linear snapshot history with a cursor.
///
/// `record` pushes a new state and drops anything that was undone; the
/// oldest states are evicted once `limit` is exceeded (0 = unbounded).
#[derive(Debug, Clone)]
pub struct History<T: Clone> {
    states: VecDeque<T>,
    /// Index of the current state in `states`.
    cursor: usize,
    limit: usize,
}

impl<T: Clone> History<T> {
    pub fn new(initial: T, limit: usize) -> Self {
        Self {
            states: VecDeque::from([initial]),
            cursor: 0,
            limit,
        }
    }

    pub fn current(&self) -> &T {
        &self.states[self.cursor]
    }

    pub fn record(&mut self, snapshot: T) {
        self.states.truncate(self.cursor + 1);
        self.states.push_back(snapshot);
        if self.limit > 0 && self.states.len() > self.limit {
            self.states.pop_front();
        }
        self.cursor = self.states.len() - 1;
    }

    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.states.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }
}
