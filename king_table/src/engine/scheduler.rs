//! Queue, pairing and the win-streak rule.
//!
//! Players move between two places: the waiting queue and the active
//! matches. Whoever has waited longest plays next. The winner of a game
//! stays on and faces the next waiting player, until they've won
//! `max_consecutive_wins` games in a row; then they go to the back of the
//! queue along with the player they just beat.

use log::{debug, info};
use std::collections::VecDeque;

use super::errors::{Effect, EngineError, EngineResult, NoOp};
use super::snapshot::Snapshot;
use crate::config::TournamentConfig;
use crate::constants::MIN_PLAYERS;
use crate::entities::{ActiveMatch, PlayerName, PlayerStatus, StandingRecord, TableId};
use crate::standings::StandingsTracker;
use crate::tables::TableAllocator;

/// State of one running tournament.
#[derive(Clone, Debug)]
pub struct MatchQueue {
    players: Vec<PlayerName>,
    queue: VecDeque<PlayerName>,
    active: Vec<ActiveMatch>,
    tables: TableAllocator,
    standings: StandingsTracker,
    max_consecutive_wins: u32,
}

impl MatchQueue {
    /// Start a tournament with `names` queued in the given order, and fill
    /// as many tables as possible.
    ///
    /// Names are trimmed and blank ones skipped. The table count is
    /// clamped to what the players can fill.
    pub fn start<S: AsRef<str>>(
        names: impl IntoIterator<Item = S>,
        config: &TournamentConfig,
    ) -> EngineResult<Self> {
        let players: Vec<PlayerName> = names
            .into_iter()
            .map(|name| PlayerName::new(name.as_ref()))
            .filter(|name| !name.is_empty())
            .collect();

        if players.len() < MIN_PLAYERS {
            return Err(EngineError::NotEnoughPlayers {
                found: players.len(),
            });
        }

        let mut standings = StandingsTracker::new();
        for player in &players {
            standings.initialize(player.clone())?;
        }

        let config = config.clamped(players.len());
        let mut state = Self {
            queue: players.iter().cloned().collect(),
            players,
            active: Vec::new(),
            tables: TableAllocator::new(config.tables),
            standings,
            max_consecutive_wins: config.max_consecutive_wins,
        };
        info!(
            "starting tournament with {} players on {} table(s), max streak {}",
            state.players.len(),
            config.tables,
            config.max_consecutive_wins
        );
        state.fill_tables();
        Ok(state)
    }

    /// Rebuild state from a snapshot, after checking it for consistency.
    pub fn from_snapshot(snapshot: &Snapshot) -> EngineResult<Self> {
        snapshot.validate()?;
        let standings = StandingsTracker::from_records(snapshot.players.iter().map(|player| {
            let record = snapshot.standings.get(player).cloned().unwrap_or_default();
            (player.clone(), record)
        }))?;

        Ok(Self {
            players: snapshot.players.clone(),
            queue: snapshot.queue.iter().cloned().collect(),
            active: snapshot.active_matches.clone(),
            tables: TableAllocator::with_checked_out(snapshot.tables, snapshot.tables_in_use()),
            standings,
            max_consecutive_wins: snapshot.max_consecutive_wins,
        })
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            players: self.players.clone(),
            queue: self.queue.iter().cloned().collect(),
            active_matches: self.active.clone(),
            standings: self
                .standings
                .iter()
                .map(|(name, record)| (name.clone(), record.clone()))
                .collect(),
            tables: self.tables.capacity(),
            max_consecutive_wins: self.max_consecutive_wins,
        }
    }

    /// Pair the two longest-waiting players onto free tables until either
    /// tables or waiting players run out. Returns how many matches began.
    pub fn fill_tables(&mut self) -> usize {
        let mut started = 0;
        while self.active.len() < self.tables.capacity() && self.queue.len() >= 2 {
            let Some(table) = self.tables.checkout() else {
                break;
            };
            let (Some(player1), Some(player2)) = (self.queue.pop_front(), self.queue.pop_front())
            else {
                break;
            };
            debug!("table {table}: {player1} vs {player2}");
            self.active.push(ActiveMatch::new(player1, player2, table));
            started += 1;
        }
        started
    }

    /// Register a new player at the back of the queue.
    pub fn add_player(&mut self, name: &str) -> EngineResult<()> {
        let name = PlayerName::new(name);
        if name.is_empty() {
            return Err(EngineError::EmptyName);
        }
        self.standings.initialize(name.clone())?;
        info!("{name} joined the queue");
        self.players.push(name.clone());
        self.queue.push_back(name);
        self.fill_tables();
        Ok(())
    }

    /// Record that `winner` won the match at `match_index`.
    ///
    /// A match index that no longer exists is ignored. Naming someone who
    /// isn't playing in that match is an error.
    pub fn report_result(&mut self, match_index: usize, winner: &str) -> EngineResult<Effect> {
        let Some(game) = self.active.get(match_index) else {
            debug!("ignoring result for missing match {match_index}");
            return Ok(Effect::Ignored(NoOp::NoSuchMatch(match_index)));
        };
        let winner = PlayerName::new(winner);
        let Some(loser) = game.opponent_of(winner.as_str()).cloned() else {
            return Err(EngineError::NotAParticipant {
                player: winner,
                match_index,
            });
        };
        let table = game.table;

        self.standings.record_win(&winner, &loser)?;
        self.tables.release(table);
        debug!("table {table}: {winner} beat {loser}");

        let streak = self
            .standings
            .get(winner.as_str())
            .map_or(0, |record| record.consecutive_wins);
        if self.max_consecutive_wins > 0 && streak >= self.max_consecutive_wins {
            self.standings.apply_streak_bonus(&winner)?;
            info!("{winner} won {streak} in a row and rotates off table {table}");
            self.queue.push_back(winner);
            self.queue.push_back(loser);
        } else {
            self.queue.push_back(loser);
            self.seat_winner(winner);
        }

        self.active.remove(match_index);
        self.fill_tables();
        Ok(Effect::Applied)
    }

    /// Keep a winner on a table against the longest-waiting player.
    fn seat_winner(&mut self, winner: PlayerName) {
        match (self.tables.checkout(), self.queue.pop_front()) {
            (Some(table), Some(challenger)) => {
                debug!("table {table}: {winner} stays on against {challenger}");
                self.active.push(ActiveMatch::new(winner, challenger, table));
            }
            (table, challenger) => {
                if let Some(table) = table {
                    self.tables.release(table);
                }
                if let Some(challenger) = challenger {
                    self.queue.push_front(challenger);
                }
                self.queue.push_back(winner);
            }
        }
    }

    /// Take a waiting player out of the queue. Their standings are kept.
    pub fn remove_from_queue(&mut self, position: usize) -> Effect {
        match self.queue.remove(position) {
            Some(player) => {
                info!("{player} removed from the queue");
                Effect::Applied
            }
            None => {
                debug!("ignoring removal at missing queue position {position}");
                Effect::Ignored(NoOp::NoSuchQueuePosition(position))
            }
        }
    }

    pub fn status(&self, name: &str) -> Option<PlayerStatus> {
        if !self.standings.contains(name) {
            return None;
        }
        if let Some(position) = self.queue.iter().position(|p| p.as_str() == name) {
            return Some(PlayerStatus::Queued { position });
        }
        if let Some(game) = self.active.iter().find(|game| game.involves(name)) {
            return Some(PlayerStatus::Playing { table: game.table });
        }
        Some(PlayerStatus::Withdrawn)
    }

    pub fn players(&self) -> &[PlayerName] {
        &self.players
    }

    pub fn queue(&self) -> &VecDeque<PlayerName> {
        &self.queue
    }

    pub fn active_matches(&self) -> &[ActiveMatch] {
        &self.active
    }

    pub fn standings(&self) -> &StandingsTracker {
        &self.standings
    }

    pub fn record(&self, name: &str) -> Option<&StandingRecord> {
        self.standings.get(name)
    }

    pub fn tables(&self) -> &TableAllocator {
        &self.tables
    }

    pub fn capacity(&self) -> TableId {
        self.tables.capacity()
    }

    pub fn max_consecutive_wins(&self) -> u32 {
        self.max_consecutive_wins
    }
}
