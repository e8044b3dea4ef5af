//! Engine snapshots, used both for undo and as the stored format.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::errors::{EngineError, EngineResult};
use crate::constants::{DEFAULT_MAX_CONSECUTIVE_WINS, DEFAULT_TABLES};
use crate::entities::{ActiveMatch, PlayerName, StandingRecord, TableId};

/// A full, independent copy of tournament state.
///
/// The free-table set isn't stored: it is every table up to `tables`
/// that no active match is using.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Everyone registered, in registration order
    #[serde(default)]
    pub players: Vec<PlayerName>,

    /// Players waiting for a table, longest waiting first
    #[serde(default)]
    pub queue: Vec<PlayerName>,

    #[serde(default)]
    pub active_matches: Vec<ActiveMatch>,

    #[serde(default)]
    pub standings: BTreeMap<PlayerName, StandingRecord>,

    #[serde(default = "default_tables")]
    pub tables: TableId,

    #[serde(default = "default_max_consecutive_wins")]
    pub max_consecutive_wins: u32,
}

fn default_tables() -> TableId {
    DEFAULT_TABLES
}

fn default_max_consecutive_wins() -> u32 {
    DEFAULT_MAX_CONSECUTIVE_WINS
}

impl Snapshot {
    /// Whether this snapshot holds a tournament at all.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Check that the snapshot describes a state the engine could have
    /// produced: everyone is registered exactly once, nobody is both
    /// waiting and playing, every match sits on its own table and each
    /// standings record adds up.
    pub fn validate(&self) -> EngineResult<()> {
        let corrupt = |reason: String| Err(EngineError::CorruptSnapshot(reason));

        if self.tables == 0 {
            return corrupt("table count must be at least 1".to_string());
        }
        let most_tables = (self.players.len() / 2).max(1);
        if self.tables > most_tables {
            return corrupt(format!(
                "{} tables for {} players",
                self.tables,
                self.players.len()
            ));
        }

        let mut registered = HashSet::new();
        for player in &self.players {
            if player.is_empty() {
                return corrupt("blank player name".to_string());
            }
            if !registered.insert(player.as_str()) {
                return corrupt(format!("{player} is registered twice"));
            }
            if !self.standings.contains_key(player) {
                return corrupt(format!("{player} has no standings record"));
            }
        }
        if let Some(stray) = self
            .standings
            .keys()
            .find(|name| !registered.contains(name.as_str()))
        {
            return corrupt(format!("standings record for unregistered {stray}"));
        }
        for (player, record) in &self.standings {
            let consistent = record.games >= record.wins
                && record.points >= record.wins
                && record.consecutive_wins <= record.wins
                && record.opponents.len() == record.games as usize;
            if !consistent {
                return corrupt(format!("{player}'s record doesn't add up"));
            }
        }

        let mut seen = HashSet::new();
        for player in &self.queue {
            if !registered.contains(player.as_str()) {
                return corrupt(format!("unregistered {player} is queued"));
            }
            if !seen.insert(player.as_str()) {
                return corrupt(format!("{player} is queued twice"));
            }
        }

        if self.active_matches.len() > self.tables {
            return corrupt(format!(
                "{} matches for {} tables",
                self.active_matches.len(),
                self.tables
            ));
        }
        let mut used_tables = HashSet::new();
        for game in &self.active_matches {
            if !(1..=self.tables).contains(&game.table) {
                return corrupt(format!("match on unknown table {}", game.table));
            }
            if !used_tables.insert(game.table) {
                return corrupt(format!("table {} hosts two matches", game.table));
            }
            if game.player1 == game.player2 {
                return corrupt(format!("{} is matched against themselves", game.player1));
            }
            for player in [&game.player1, &game.player2] {
                if !registered.contains(player.as_str()) {
                    return corrupt(format!("unregistered {player} is playing"));
                }
                if !seen.insert(player.as_str()) {
                    return corrupt(format!("{player} is both waiting and playing, or plays twice"));
                }
            }
        }

        Ok(())
    }

    /// Table ids currently hosting a match.
    pub fn tables_in_use(&self) -> impl Iterator<Item = TableId> + '_ {
        self.active_matches.iter().map(|game| game.table)
    }
}
