//! Engine error and outcome types.

use std::fmt;
use thiserror::Error;

use crate::constants::MIN_PLAYERS;
use crate::entities::PlayerName;

/// Rejected operations. Nothing is changed when one of these is returned.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EngineError {
    #[error(
        "at least {min} players are required to start the tournament, got {found}",
        min = MIN_PLAYERS
    )]
    NotEnoughPlayers { found: usize },

    #[error("player {0} already exists")]
    DuplicatePlayer(PlayerName),

    #[error("please enter a player name")]
    EmptyName,

    #[error("{player} is not playing in match {number}", number = .match_index + 1)]
    NotAParticipant {
        player: PlayerName,
        match_index: usize,
    },

    #[error("player {0} is not registered")]
    UnknownPlayer(PlayerName),

    #[error("a tournament is already running, reset it first")]
    TournamentInProgress,

    #[error("no tournament is running")]
    NoTournament,

    #[error("{0}'s record can't count any higher")]
    RecordOverflow(PlayerName),

    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Requests that refer to state which no longer exists, usually a stale
/// view. They are ignored rather than reported as failures.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoOp {
    NothingToUndo,
    NoSuchMatch(usize),
    NoSuchQueuePosition(usize),
}

impl fmt::Display for NoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToUndo => write!(f, "no actions to undo"),
            Self::NoSuchMatch(index) => write!(f, "there is no match {}", index + 1),
            Self::NoSuchQueuePosition(position) => {
                write!(f, "nobody is waiting at position {}", position + 1)
            }
        }
    }
}

/// What an accepted operation did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Effect {
    Applied,
    Ignored(NoOp),
}

impl Effect {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}
