use crate::entities::TableId;

/// A tournament needs at least one pairing to be worth starting.
pub const MIN_PLAYERS: usize = 2;

/// Table count assumed when a stored snapshot doesn't carry one.
pub const DEFAULT_TABLES: TableId = 1;

/// Streak length assumed when a stored snapshot doesn't carry one.
/// Winning this many games in a row rotates a player off their table.
pub const DEFAULT_MAX_CONSECUTIVE_WINS: u32 = 2;

/// Undo needs the current state plus at least one prior state.
pub const MIN_HISTORY_DEPTH: usize = 2;
