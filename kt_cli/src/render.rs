//! Plain-text rendering of a tournament.
//!
//! Each panel is a small `Display` wrapper over part of a
//! [`TournamentView`], so the REPL can print them with `println!` and tests
//! can compare the output with `to_string()`.

use king_table::{ActiveMatch, PlayerName, PlayerStatus, RankedStanding, StandingRecord, TournamentView};
use std::fmt;

/// Commands accepted at the prompt.
pub const COMMANDS_HELP: &str = "\
COMMANDS:
  start [tables=N] [streak=N] NAME, NAME, ...   Start a tournament
  add NAME                                      Add a player to the queue
  win MATCH NAME                                Record the winner of a match
  remove POSITION                               Take a player out of the queue
  status NAME                                   Show one player's record
  undo                                          Undo the last change
  reset                                         End the tournament and forget it
  show                                          Print the tables again
  help                                          Print this help
  quit                                          Leave (the tournament is kept)
";

/// Players waiting for a table, numbered from 1.
pub struct QueueList<'a>(pub &'a [PlayerName]);

impl fmt::Display for QueueList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "Queue: nobody waiting");
        }
        writeln!(f, "Queue:")?;
        for (i, player) in self.0.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, player)?;
        }
        Ok(())
    }
}

/// Matches in progress, numbered from 1 in the order `win` refers to them.
pub struct MatchList<'a>(pub &'a [ActiveMatch]);

impl fmt::Display for MatchList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "Matches: none in progress");
        }
        writeln!(f, "Matches:")?;
        for (i, game) in self.0.iter().enumerate() {
            writeln!(f, "  Match {} — Table {}: {}", i + 1, game.table, game)?;
        }
        Ok(())
    }
}

/// Ranked standings as a table.
pub struct StandingsTable<'a>(pub &'a [RankedStanding]);

impl fmt::Display for StandingsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .0
            .iter()
            .map(|row| row.player.as_str().chars().count())
            .max()
            .unwrap_or(0)
            .max("Player".len());

        writeln!(f, "Standings:")?;
        writeln!(
            f,
            "  {:>4}  {:<width$}  {:>4}  {:>6}  {:>5}",
            "Rank", "Player", "Wins", "Points", "Games"
        )?;
        for row in self.0 {
            writeln!(
                f,
                "  {:>4}  {:<width$}  {:>4}  {:>6}  {:>5}",
                row.rank,
                row.player.as_str(),
                row.record.wins,
                row.record.points,
                row.record.games
            )?;
        }
        Ok(())
    }
}

/// Everything on screen after a change: settings, queue, matches and
/// standings.
pub struct Board<'a>(pub &'a TournamentView);

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        if view.standings.is_empty() {
            return writeln!(
                f,
                "No tournament running. Type 'start NAME, NAME, ...' to begin."
            );
        }

        let streak = match view.max_consecutive_wins {
            0 => "off".to_string(),
            n => format!("{n} wins"),
        };
        writeln!(f, "Tables: {}  Streak limit: {}", view.tables, streak)?;
        writeln!(f)?;
        write!(f, "{}", MatchList(&view.active_matches))?;
        writeln!(f)?;
        write!(f, "{}", QueueList(&view.queue))?;
        writeln!(f)?;
        write!(f, "{}", StandingsTable(&view.standings))
    }
}

/// One player's status and record, for the `status` command.
pub struct PlayerSummary<'a> {
    pub name: &'a str,
    pub status: Option<PlayerStatus>,
    pub record: Option<&'a StandingRecord>,
}

impl fmt::Display for PlayerSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(status), Some(record)) = (self.status, self.record) else {
            return writeln!(f, "{} is not registered", self.name);
        };
        writeln!(
            f,
            "{}: {} ({} wins, {} losses, {} points, streak {})",
            self.name,
            status,
            record.wins,
            record.losses(),
            record.points,
            record.consecutive_wins
        )?;
        for entry in &record.opponents {
            writeln!(f, "  {entry}")?;
        }
        Ok(())
    }
}
