use crate::document::Snapshot;

/// Linear undo/redo log of document snapshots.
///
/// `cursor` points at the snapshot that is currently live. A fresh history has
/// no snapshots and no cursor.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: Option<usize>,
    /// Maximum number of snapshots kept; oldest ones are dropped first
    limit: Option<usize>,
}

impl History {
    /// Creates a history holding a single empty snapshot
    pub fn new() -> Self {
        let mut history = Self::default();
        history.reset();
        history
    }

    /// Like [`History::new`], but never keeps more than `limit` snapshots.
    pub fn with_limit(limit: usize) -> Self {
        let mut history = Self {
            limit: Some(limit.max(1)),
            ..Self::default()
        };
        history.reset();
        history
    }

    /// Record a new snapshot, discarding anything after the cursor
    pub fn commit(&mut self, snapshot: Snapshot) {
        if let Some(cursor) = self.cursor {
            if cursor + 1 < self.snapshots.len() {
                log::debug!(
                    "Discarding {} redo snapshot(s)",
                    self.snapshots.len() - cursor - 1
                );
                self.snapshots.truncate(cursor + 1);
            }
        }

        self.snapshots.push(snapshot);

        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                let excess = self.snapshots.len() - limit;
                self.snapshots.drain(..excess);
            }
        }

        self.cursor = Some(self.snapshots.len() - 1);
    }

    /// Step back one snapshot. Returns `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Snapshot> {
        let cursor = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(cursor);
        self.snapshots.get(cursor).cloned()
    }

    /// Step forward one snapshot. Returns `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let next = self.cursor? + 1;
        let snapshot = self.snapshots.get(next)?.clone();
        self.cursor = Some(next);
        Some(snapshot)
    }

    /// Drop every snapshot and start over from an empty document
    pub fn reset(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
        self.commit(Snapshot::empty());
    }

    /// Returns true if there are snapshots that can be undone
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.snapshots.len())
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.cursor?)
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
