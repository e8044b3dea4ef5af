//! Linear undo history.

use std::collections::VecDeque;

use super::snapshot::Snapshot;
use crate::constants::MIN_HISTORY_DEPTH;

/// Post-operation snapshots, oldest first. The newest entry is always the
/// live state.
#[derive(Clone, Debug, Default)]
pub struct HistoryStack {
    entries: VecDeque<Snapshot>,
    limit: Option<usize>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// A history that forgets its oldest entries beyond `limit`. The limit
    /// never drops below what a single undo needs.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.map(|l| l.max(MIN_HISTORY_DEPTH)),
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push_back(snapshot);
        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
    }

    /// Drop the live state and return the one before it, which becomes
    /// the new live state. `None` when there's nothing to go back to.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.entries.pop_back();
        self.entries.back()
    }

    /// The entry [`undo`](Self::undo) would go back to, left in place.
    pub fn previous(&self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.entries.get(self.entries.len() - 2)
    }

    pub fn can_undo(&self) -> bool {
        self.entries.len() >= MIN_HISTORY_DEPTH
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
