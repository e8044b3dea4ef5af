//! The operations callers drive a tournament with.

use log::{debug, info};
use serde::Serialize;

use super::errors::{Effect, EngineError, EngineResult, NoOp};
use super::history::HistoryStack;
use super::scheduler::MatchQueue;
use super::snapshot::Snapshot;
use crate::config::TournamentConfig;
use crate::entities::{ActiveMatch, PlayerName, PlayerStatus, StandingRecord, TableId};

/// One row of the ranked standings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RankedStanding {
    /// 1-based
    pub rank: usize,
    pub player: PlayerName,
    pub record: StandingRecord,
}

/// Read-only copy of what a renderer needs.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TournamentView {
    pub queue: Vec<PlayerName>,
    pub active_matches: Vec<ActiveMatch>,
    pub standings: Vec<RankedStanding>,
    pub tables: TableId,
    pub max_consecutive_wins: u32,
}

/// A tournament engine.
///
/// Every accepted change records a snapshot of the resulting state, which
/// is what `undo` steps back through. The engine itself never saves or
/// renders anything; callers read [`TournamentEngine::snapshot`] and
/// [`TournamentEngine::view`] after each operation.
#[derive(Clone, Debug, Default)]
pub struct TournamentEngine {
    config: TournamentConfig,
    state: Option<MatchQueue>,
    history: HistoryStack,
}

impl TournamentEngine {
    pub fn new(config: TournamentConfig) -> Self {
        Self {
            history: HistoryStack::with_limit(config.history_limit),
            config,
            state: None,
        }
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Start a tournament.
    ///
    /// `tables` is clamped to between 1 and half the player count, and a
    /// negative `max_consecutive_wins` is treated as 0, which turns the
    /// streak rule off.
    pub fn start_tournament<S: AsRef<str>>(
        &mut self,
        names: impl IntoIterator<Item = S>,
        tables: i64,
        max_consecutive_wins: i64,
    ) -> EngineResult<Effect> {
        if self.state.is_some() {
            return Err(EngineError::TournamentInProgress);
        }
        let config = TournamentConfig {
            history_limit: self.config.history_limit,
            ..TournamentConfig::new(tables, max_consecutive_wins)
        };
        let state = MatchQueue::start(names, &config)?;
        self.config = config.clamped(state.players().len());
        self.state = Some(state);
        self.history.clear();
        self.commit();
        Ok(Effect::Applied)
    }

    /// Register a player in a running tournament and queue them.
    pub fn add_player(&mut self, name: &str) -> EngineResult<Effect> {
        self.running_mut()?.add_player(name)?;
        self.commit();
        Ok(Effect::Applied)
    }

    /// Record the winner of the match at `match_index` (0-based, in the
    /// order of [`TournamentView::active_matches`]).
    pub fn report_result(&mut self, match_index: usize, winner: &str) -> EngineResult<Effect> {
        let effect = self.running_mut()?.report_result(match_index, winner)?;
        if effect.is_applied() {
            self.commit();
        }
        Ok(effect)
    }

    /// Take the player at 0-based `position` out of the queue.
    pub fn remove_from_queue(&mut self, position: usize) -> EngineResult<Effect> {
        let effect = self.running_mut()?.remove_from_queue(position);
        if effect.is_applied() {
            self.commit();
        }
        Ok(effect)
    }

    /// Go back to the state before the last accepted change.
    pub fn undo(&mut self) -> EngineResult<Effect> {
        let Some(previous) = self.history.previous() else {
            debug!("nothing to undo");
            return Ok(Effect::Ignored(NoOp::NothingToUndo));
        };
        let state = MatchQueue::from_snapshot(previous)?;
        self.history.undo();
        info!("undid last action, {} undo step(s) left", self.history.len() - 1);
        self.state = Some(state);
        Ok(Effect::Applied)
    }

    /// Forget the tournament and its history.
    pub fn reset(&mut self) {
        info!("tournament reset");
        self.state = None;
        self.history.clear();
    }

    /// Replace all state with a stored snapshot. The snapshot becomes the
    /// oldest undo step. An empty snapshot leaves the engine idle.
    pub fn restore(&mut self, snapshot: Snapshot) -> EngineResult<()> {
        if snapshot.is_empty() {
            self.reset();
            return Ok(());
        }
        let state = MatchQueue::from_snapshot(&snapshot)?;
        info!(
            "restored tournament with {} players, {} match(es) in progress",
            state.players().len(),
            state.active_matches().len()
        );
        self.config.tables = snapshot.tables;
        self.config.max_consecutive_wins = snapshot.max_consecutive_wins;
        self.state = Some(state);
        self.history.clear();
        self.history.push(snapshot);
        Ok(())
    }

    /// The current state as a storable value, `None` when idle.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.state.as_ref().map(MatchQueue::to_snapshot)
    }

    pub fn view(&self) -> TournamentView {
        let Some(state) = &self.state else {
            return TournamentView::default();
        };
        TournamentView {
            queue: state.queue().iter().cloned().collect(),
            active_matches: state.active_matches().to_vec(),
            standings: state
                .standings()
                .ranked()
                .into_iter()
                .enumerate()
                .map(|(i, (player, record))| RankedStanding {
                    rank: i + 1,
                    player: player.clone(),
                    record: record.clone(),
                })
                .collect(),
            tables: state.capacity(),
            max_consecutive_wins: state.max_consecutive_wins(),
        }
    }

    pub fn player_status(&self, name: &str) -> Option<PlayerStatus> {
        self.state.as_ref()?.status(name)
    }

    pub fn record(&self, name: &str) -> Option<&StandingRecord> {
        self.state.as_ref()?.record(name)
    }

    pub fn state(&self) -> Option<&MatchQueue> {
        self.state.as_ref()
    }

    fn running_mut(&mut self) -> EngineResult<&mut MatchQueue> {
        self.state.as_mut().ok_or(EngineError::NoTournament)
    }

    fn commit(&mut self) {
        if let Some(state) = &self.state {
            self.history.push(state.to_snapshot());
        }
    }
}
