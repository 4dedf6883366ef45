//! Linear undo/redo over whole-state snapshots.

/// Snapshot history with a cursor.
///
/// The cursor always indexes a valid entry and every entry after it is redoable.
/// Committing a state equal to the current one is a no-op.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
    limit: usize,
}

impl<T: Clone + PartialEq> History<T> {
    /// Start a history whose only entry is `initial`. `limit` is clamped to at least 1.
    pub fn new(initial: T, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// The state at the cursor.
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    /// Push a new state, dropping any redo suffix.
    ///
    /// Returns false (and changes nothing) when `state` equals the current entry.
    pub fn commit(&mut self, state: T) -> bool {
        if *self.current() == state {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state);
        if self.entries.len() > self.limit {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Step back one entry. Returns the new current state, or `None` at the start.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward one entry. Returns the new current state, or `None` at the end.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Drop everything and start over from `initial`.
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }
}
