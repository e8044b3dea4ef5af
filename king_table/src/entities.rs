use serde::{Deserialize, Deserializer, Serialize};
use std::{borrow::Borrow, fmt};

/// Tables are numbered from 1 up to the configured table count.
pub type TableId = usize;

/// A player's display name. Names are the only player identity, so two
/// names that differ only by surrounding whitespace are the same player.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: &str) -> Self {
        Self(s.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<&str> for PlayerName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlayerName {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl Borrow<str> for PlayerName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// How a finished game went from the point of view of the record holder.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Won,
    Lost,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Won => "beat",
            Self::Lost => "lost to",
        };
        write!(f, "{repr}")
    }
}

/// One entry of a player's opponent history.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "StoredOpponent")]
pub struct OpponentEntry {
    pub opponent: PlayerName,
    pub result: GameResult,
}

impl OpponentEntry {
    pub fn new(opponent: PlayerName, result: GameResult) -> Self {
        Self { opponent, result }
    }
}

impl fmt::Display for OpponentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.result, self.opponent)
    }
}

/// Opponent entries as they may appear in stored snapshots. Older
/// snapshots encode the result in the name's casing: an upper-cased name
/// was beaten, anything else was lost to.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredOpponent {
    Tagged {
        opponent: PlayerName,
        result: GameResult,
    },
    Legacy(String),
}

impl From<StoredOpponent> for OpponentEntry {
    fn from(value: StoredOpponent) -> Self {
        match value {
            StoredOpponent::Tagged { opponent, result } => Self { opponent, result },
            StoredOpponent::Legacy(name) => {
                let has_case = name.chars().any(char::is_alphabetic)
                    && name.to_uppercase() != name.to_lowercase();
                let result = if has_case && name == name.to_uppercase() {
                    GameResult::Won
                } else {
                    GameResult::Lost
                };
                Self {
                    opponent: PlayerName::new(&name),
                    result,
                }
            }
        }
    }
}

/// Per-player tournament statistics.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct StandingRecord {
    pub wins: u32,
    /// One per win, plus one bonus each time the streak rule fires.
    pub points: u32,
    pub games: u32,
    #[serde(rename = "consecutive")]
    pub consecutive_wins: u32,
    #[serde(rename = "players_played")]
    pub opponents: Vec<OpponentEntry>,
}

impl StandingRecord {
    pub fn losses(&self) -> u32 {
        self.games.saturating_sub(self.wins)
    }
}

/// A game in progress.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ActiveMatch {
    pub player1: PlayerName,
    pub player2: PlayerName,
    pub table: TableId,
}

impl ActiveMatch {
    pub fn new(player1: PlayerName, player2: PlayerName, table: TableId) -> Self {
        debug_assert_ne!(player1, player2, "a player can't face themselves");
        Self {
            player1,
            player2,
            table,
        }
    }

    pub fn involves(&self, name: &str) -> bool {
        self.player1.as_str() == name || self.player2.as_str() == name
    }

    /// The other participant, or `None` if `name` isn't playing here.
    pub fn opponent_of(&self, name: &str) -> Option<&PlayerName> {
        if self.player1.as_str() == name {
            Some(&self.player2)
        } else if self.player2.as_str() == name {
            Some(&self.player1)
        } else {
            None
        }
    }
}

impl fmt::Display for ActiveMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.player1, self.player2)
    }
}

/// Where a registered player currently is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlayerStatus {
    /// Waiting at the given 0-based queue position.
    Queued { position: usize },
    Playing { table: TableId },
    /// Removed from the queue by hand. Keeps their standings but is no
    /// longer scheduled.
    Withdrawn,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued { position } => write!(f, "queued at #{}", position + 1),
            Self::Playing { table } => write!(f, "playing at table {table}"),
            Self::Withdrawn => write!(f, "withdrawn"),
        }
    }
}
