//! Tournament configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_CONSECUTIVE_WINS, DEFAULT_TABLES, MIN_HISTORY_DEPTH};
use crate::entities::TableId;

/// Tournament configuration
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TournamentConfig {
    /// Number of tables games are played on
    pub tables: TableId,

    /// Wins in a row before a player is rotated off their table (0 disables)
    pub max_consecutive_wins: u32,

    /// Maximum number of undo states kept (unbounded if `None`)
    pub history_limit: Option<usize>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            tables: DEFAULT_TABLES,
            max_consecutive_wins: DEFAULT_MAX_CONSECUTIVE_WINS,
            history_limit: None,
        }
    }
}

impl TournamentConfig {
    /// Build a configuration from raw user input. Negative values are
    /// clamped instead of rejected, a table count below 1 becomes 1.
    pub fn new(tables: i64, max_consecutive_wins: i64) -> Self {
        Self {
            tables: usize::try_from(tables.max(1)).unwrap_or(TableId::MAX),
            max_consecutive_wins: u32::try_from(max_consecutive_wins.max(0)).unwrap_or(u32::MAX),
            history_limit: None,
        }
    }

    #[must_use]
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit.map(|l| l.max(MIN_HISTORY_DEPTH));
        self
    }

    /// Limit the table count to what `player_count` players can fill.
    #[must_use]
    pub fn clamped(&self, player_count: usize) -> Self {
        let most_tables = (player_count / 2).max(1);
        Self {
            tables: self.tables.clamp(1, most_tables),
            ..self.clone()
        }
    }

    pub fn streak_rule_enabled(&self) -> bool {
        self.max_consecutive_wins > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TournamentConfig::default();
        assert_eq!(config.tables, 1);
        assert_eq!(config.max_consecutive_wins, 2);
        assert_eq!(config.history_limit, None);
        assert!(config.streak_rule_enabled());
    }

    #[test]
    fn test_negative_input_is_clamped() {
        let config = TournamentConfig::new(-3, -1);
        assert_eq!(config.tables, 1);
        assert_eq!(config.max_consecutive_wins, 0);
        assert!(!config.streak_rule_enabled());
    }

    #[test]
    fn test_tables_clamped_to_half_the_players() {
        let config = TournamentConfig::new(6, 2);
        assert_eq!(config.clamped(5).tables, 2);
        assert_eq!(config.clamped(12).tables, 6);
        assert_eq!(config.clamped(40).tables, 6);
    }

    #[test]
    fn test_clamp_never_drops_below_one_table() {
        let config = TournamentConfig::new(4, 2);
        assert_eq!(config.clamped(0).tables, 1);
        assert_eq!(config.clamped(3).tables, 1);
    }

    #[test]
    fn test_history_limit_keeps_room_for_undo() {
        let config = TournamentConfig::default().with_history_limit(Some(1));
        assert_eq!(config.history_limit, Some(MIN_HISTORY_DEPTH));
        let config = TournamentConfig::default().with_history_limit(Some(50));
        assert_eq!(config.history_limit, Some(50));
    }
}
