//! Runs commands against the engine and keeps the stored snapshot current.

use king_table::{
    Effect, EngineError, NoOp, SnapshotStore, StoreError, TournamentEngine, TournamentView,
};
use log::{debug, info, warn};
use thiserror::Error;

use crate::commands::Command;
use crate::config::CliConfig;
use crate::render::PlayerSummary;

/// Errors that can occur while executing a command.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The engine refused the command; nothing changed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The change was made but could not be stored.
    #[error("could not save the tournament: {0}")]
    Store(#[from] StoreError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// What the caller should show after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The tournament changed and was saved.
    Updated,
    /// The command referred to something that isn't there any more.
    Ignored(NoOp),
    /// Print the board as is.
    Show,
    /// A player's status, already rendered.
    Status(String),
    Help,
    Quit,
}

/// An engine paired with the store its snapshots go to.
///
/// Every accepted change, undo included, overwrites the stored snapshot.
/// Reset clears it.
pub struct Session<S: SnapshotStore> {
    engine: TournamentEngine,
    store: S,
    tables: i64,
    max_consecutive_wins: i64,
}

impl<S: SnapshotStore> Session<S> {
    /// Start with an idle engine, ignoring anything in `store`.
    pub fn new(config: &CliConfig, store: S) -> Self {
        Self {
            engine: TournamentEngine::new(config.tournament()),
            store,
            tables: config.tables,
            max_consecutive_wins: config.max_consecutive_wins,
        }
    }

    /// Resume the tournament kept in `store`, if any.
    ///
    /// A snapshot that can't be read or doesn't describe a valid tournament
    /// is logged and skipped, and the session starts idle. The stored file
    /// stays until the next change overwrites it.
    pub fn open(config: &CliConfig, store: S) -> SessionResult<Self> {
        let mut session = Self::new(config, store);
        match session.store.load() {
            Ok(Some(snapshot)) => match session.engine.restore(snapshot) {
                Ok(()) => info!("resumed stored tournament"),
                Err(e) => warn!("ignoring stored tournament: {e}"),
            },
            Ok(None) => debug!("no stored tournament"),
            Err(StoreError::Serialization(e)) => warn!("ignoring unreadable stored tournament: {e}"),
            Err(StoreError::Engine(e)) => warn!("ignoring stored tournament: {e}"),
            Err(e) => return Err(e.into()),
        }
        Ok(session)
    }

    pub fn engine(&self) -> &TournamentEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> TournamentView {
        self.engine.view()
    }

    /// Run one command.
    pub fn execute(&mut self, command: Command) -> SessionResult<Response> {
        let effect = match command {
            Command::Start {
                names,
                tables,
                streak,
            } => self.engine.start_tournament(
                names,
                tables.unwrap_or(self.tables),
                streak.unwrap_or(self.max_consecutive_wins),
            )?,
            Command::Add(name) => self.engine.add_player(&name)?,
            Command::Win {
                match_number,
                winner,
            } => self
                .engine
                .report_result(match_number.saturating_sub(1), &winner)?,
            Command::Remove(position) => self
                .engine
                .remove_from_queue(position.saturating_sub(1))?,
            Command::Undo => self.engine.undo()?,
            Command::Reset => {
                self.engine.reset();
                self.store.clear()?;
                return Ok(Response::Updated);
            }
            Command::Status(name) => {
                let name = name.trim();
                let summary = PlayerSummary {
                    name,
                    status: self.engine.player_status(name),
                    record: self.engine.record(name),
                };
                return Ok(Response::Status(summary.to_string()));
            }
            Command::Show => return Ok(Response::Show),
            Command::Help => return Ok(Response::Help),
            Command::Quit => return Ok(Response::Quit),
        };

        match effect {
            Effect::Applied => {
                self.persist()?;
                Ok(Response::Updated)
            }
            Effect::Ignored(reason) => Ok(Response::Ignored(reason)),
        }
    }

    fn persist(&mut self) -> SessionResult<()> {
        match self.engine.snapshot() {
            Some(snapshot) => self.store.save(&snapshot)?,
            None => self.store.clear()?,
        }
        Ok(())
    }
}
