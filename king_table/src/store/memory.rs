use super::{SnapshotStore, StoreResult};
use crate::engine::Snapshot;

/// Keeps the snapshot in memory. Useful for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    snapshot: Option<Snapshot>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            saves: 0,
        }
    }

    /// How many times `save` was called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<Snapshot>> {
        if let Some(snapshot) = &self.snapshot {
            snapshot.validate()?;
        }
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> StoreResult<()> {
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.snapshot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineError;
    use crate::store::StoreError;

    #[test]
    fn test_load_checks_the_held_snapshot() {
        let broken = Snapshot {
            players: vec!["A".into(), "B".into()],
            queue: vec!["A".into(), "B".into()],
            active_matches: Vec::new(),
            standings: Default::default(),
            tables: 1,
            max_consecutive_wins: 2,
        };
        assert!(matches!(
            MemoryStore::with_snapshot(broken).load(),
            Err(StoreError::Engine(EngineError::CorruptSnapshot(_)))
        ));
        assert!(MemoryStore::new().load().unwrap().is_none());
    }
}
