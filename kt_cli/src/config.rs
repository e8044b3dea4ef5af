//! Command-line configuration.
//!
//! Consolidates environment variable reads and CLI overrides into one
//! validated configuration.

use king_table::{TournamentConfig, constants::MIN_HISTORY_DEPTH};
use std::path::PathBuf;

/// Snapshot file used when neither `--state` nor `KT_STATE_FILE` is set
pub const DEFAULT_STATE_FILE: &str = "king_table.json";

/// Complete CLI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Where the tournament snapshot is kept between runs
    pub state_file: PathBuf,
    /// Table count offered to new tournaments
    pub tables: i64,
    /// Win streak that rotates a player off their table (0 disables)
    pub max_consecutive_wins: i64,
    /// Maximum undo depth (unbounded if `None`)
    pub history_limit: Option<usize>,
}

impl Default for CliConfig {
    fn default() -> Self {
        let defaults = TournamentConfig::default();
        Self {
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            tables: defaults.tables as i64,
            max_consecutive_wins: i64::from(defaults.max_consecutive_wins),
            history_limit: defaults.history_limit,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `state_file_override` - Optional snapshot path (from CLI args)
    /// * `tables_override` - Optional table count (from CLI args)
    /// * `streak_override` - Optional win streak limit (from CLI args)
    /// * `history_override` - Optional undo depth (from CLI args)
    ///
    /// Unparseable environment values fall back to the defaults.
    pub fn from_env(
        state_file_override: Option<PathBuf>,
        tables_override: Option<i64>,
        streak_override: Option<i64>,
        history_override: Option<usize>,
    ) -> Self {
        let defaults = Self::default();

        let state_file = state_file_override
            .or_else(|| std::env::var_os("KT_STATE_FILE").map(PathBuf::from))
            .unwrap_or(defaults.state_file);

        let tables = tables_override.unwrap_or_else(|| parse_env_or("KT_TABLES", defaults.tables));

        let max_consecutive_wins = streak_override
            .unwrap_or_else(|| parse_env_or("KT_MAX_STREAK", defaults.max_consecutive_wins));

        let history_limit = history_override.or_else(|| {
            std::env::var("KT_HISTORY_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
        });

        CliConfig {
            state_file,
            tables,
            max_consecutive_wins,
            history_limit,
        }
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.state_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "KT_STATE_FILE".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.state_file.is_dir() {
            return Err(ConfigError::Invalid {
                var: "KT_STATE_FILE".to_string(),
                reason: format!("{} is a directory", self.state_file.display()),
            });
        }

        if self.tables < 1 {
            return Err(ConfigError::Invalid {
                var: "KT_TABLES".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.max_consecutive_wins < 0 {
            return Err(ConfigError::Invalid {
                var: "KT_MAX_STREAK".to_string(),
                reason: "Must be 0 (disabled) or greater".to_string(),
            });
        }

        if self
            .history_limit
            .is_some_and(|limit| limit < MIN_HISTORY_DEPTH)
        {
            return Err(ConfigError::Invalid {
                var: "KT_HISTORY_LIMIT".to_string(),
                reason: format!("Must be at least {MIN_HISTORY_DEPTH}"),
            });
        }

        Ok(())
    }

    /// Engine configuration for a new tournament.
    pub fn tournament(&self) -> TournamentConfig {
        TournamentConfig::new(self.tables, self.max_consecutive_wins)
            .with_history_limit(self.history_limit)
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
