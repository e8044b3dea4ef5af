//! Snapshot persistence.
//!
//! The engine never saves anything itself. Callers hand the snapshot of
//! each accepted change to a [`SnapshotStore`], which overwrites whatever
//! it held before.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use thiserror::Error;

use crate::engine::{EngineError, Snapshot};

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Where snapshots are kept between runs.
pub trait SnapshotStore {
    /// The last saved snapshot, or `None` if nothing was saved.
    ///
    /// A snapshot that fails [`Snapshot::validate`] is returned as
    /// [`StoreError::Engine`].
    fn load(&self) -> StoreResult<Option<Snapshot>>;

    /// Replace the saved snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> StoreResult<()>;

    /// Forget the saved snapshot.
    fn clear(&mut self) -> StoreResult<()>;
}
