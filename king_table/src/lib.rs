//! # King Table
//!
//! A scheduling and standings engine for "king of the table" tournaments.
//!
//! Players wait in a queue and are paired onto a fixed pool of tables. The
//! winner of a game keeps their table and plays the next person in line;
//! after a configurable number of wins in a row they are rotated to the
//! back of the queue with a bonus point, so others get table time.
//!
//! ## Core Modules
//!
//! - [`engine`]: queue and pairing state machine, undo history, snapshots
//! - [`standings`]: per-player wins, points, games and streaks
//! - [`tables`]: the pool of table ids
//! - [`store`]: loading and saving snapshots
//!
//! ## Example
//!
//! ```
//! use king_table::TournamentEngine;
//!
//! let mut engine = TournamentEngine::default();
//! engine.start_tournament(["A", "B", "C", "D"], 2, 2).unwrap();
//! engine.report_result(1, "C").unwrap();
//!
//! let leader = &engine.view().standings[0];
//! assert_eq!(leader.player.as_str(), "C");
//! ```

pub mod config;
pub mod constants;
pub mod entities;

/// Queue and pairing state machine, undo history and snapshots.
pub mod engine;
pub use engine::{
    Effect, EngineError, EngineResult, NoOp, RankedStanding, Snapshot, TournamentEngine,
    TournamentView,
};

pub mod standings;
pub mod tables;

/// Snapshot persistence.
pub mod store;
pub use store::{JsonFileStore, MemoryStore, SnapshotStore, StoreError, StoreResult};

pub use config::TournamentConfig;
pub use entities::{
    ActiveMatch, GameResult, OpponentEntry, PlayerName, PlayerStatus, StandingRecord, TableId,
};
