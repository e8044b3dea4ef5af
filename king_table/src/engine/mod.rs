//! Tournament engine.
//!
//! This module implements:
//! - MatchQueue: the waiting queue, active matches, pairing and the win-streak rule
//! - HistoryStack: linear undo over full state snapshots
//! - Snapshot: the value copy of engine state used for undo and storage
//! - TournamentEngine: the operations callers drive a tournament with
//!
//! ## Example
//!
//! ```
//! use king_table::engine::TournamentEngine;
//!
//! let mut engine = TournamentEngine::default();
//! engine.start_tournament(["alice", "bob", "carol", "dave"], 2, 2).unwrap();
//!
//! let view = engine.view();
//! assert_eq!(view.active_matches.len(), 2);
//!
//! engine.report_result(0, "alice").unwrap();
//! assert_eq!(engine.record("alice").unwrap().wins, 1);
//! ```

pub mod errors;
pub mod facade;
pub mod history;
pub mod scheduler;
pub mod snapshot;

pub use errors::{Effect, EngineError, EngineResult, NoOp};
pub use facade::{RankedStanding, TournamentEngine, TournamentView};
pub use history::HistoryStack;
pub use scheduler::MatchQueue;
pub use snapshot::Snapshot;
