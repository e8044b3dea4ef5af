//! Standings bookkeeping.

use std::collections::HashMap;

use crate::engine::errors::{EngineError, EngineResult};
use crate::entities::{GameResult, OpponentEntry, PlayerName, StandingRecord};

/// Per-player records, remembering the order players were registered in.
/// That order breaks ties in the ranking.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StandingsTracker {
    order: Vec<PlayerName>,
    records: HashMap<PlayerName, StandingRecord>,
}

impl StandingsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a tracker from records in registration order.
    pub fn from_records(
        records: impl IntoIterator<Item = (PlayerName, StandingRecord)>,
    ) -> EngineResult<Self> {
        let mut tracker = Self::new();
        for (name, record) in records {
            if tracker.records.contains_key(&name) {
                return Err(EngineError::DuplicatePlayer(name));
            }
            tracker.order.push(name.clone());
            tracker.records.insert(name, record);
        }
        Ok(tracker)
    }

    /// Create an empty record for a new player.
    pub fn initialize(&mut self, name: PlayerName) -> EngineResult<()> {
        if self.records.contains_key(&name) {
            return Err(EngineError::DuplicatePlayer(name));
        }
        self.order.push(name.clone());
        self.records.insert(name, StandingRecord::default());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&StandingRecord> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Records in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerName, &StandingRecord)> {
        self.order
            .iter()
            .filter_map(|name| self.records.get_key_value(name))
    }

    /// Count a finished game. Both players must be registered; if either
    /// isn't, or a counter would overflow, neither record is touched.
    ///
    /// The winner's points keep room for a streak bonus, so
    /// [`apply_streak_bonus`](Self::apply_streak_bonus) right after a
    /// successful call can't fail.
    pub fn record_win(&mut self, winner: &PlayerName, loser: &PlayerName) -> EngineResult<()> {
        debug_assert_ne!(winner, loser, "a player can't beat themselves");
        for name in [winner, loser] {
            if !self.records.contains_key(name) {
                return Err(EngineError::UnknownPlayer(name.clone()));
            }
        }

        let overflow = |name: &PlayerName| EngineError::RecordOverflow(name.clone());
        let current = self.record(winner)?;
        let won = (
            current.wins.checked_add(1),
            current.points.checked_add(2).map(|p| p - 1),
            current.games.checked_add(1),
            current.consecutive_wins.checked_add(1),
        );
        let (Some(wins), Some(points), Some(winner_games), Some(streak)) = won else {
            return Err(overflow(winner));
        };
        let loser_games = self
            .record(loser)?
            .games
            .checked_add(1)
            .ok_or_else(|| overflow(loser))?;

        let record = self.record_mut(winner)?;
        record.wins = wins;
        record.points = points;
        record.games = winner_games;
        record.consecutive_wins = streak;
        record
            .opponents
            .push(OpponentEntry::new(loser.clone(), GameResult::Won));

        let record = self.record_mut(loser)?;
        record.games = loser_games;
        record.consecutive_wins = 0;
        record
            .opponents
            .push(OpponentEntry::new(winner.clone(), GameResult::Lost));

        Ok(())
    }

    /// Award the extra point for completing a streak and start counting
    /// from zero again.
    pub fn apply_streak_bonus(&mut self, winner: &PlayerName) -> EngineResult<()> {
        let record = self.record_mut(winner)?;
        record.points = record
            .points
            .checked_add(1)
            .ok_or_else(|| EngineError::RecordOverflow(winner.clone()))?;
        record.consecutive_wins = 0;
        Ok(())
    }

    /// Records ordered by wins, most first. Players with equal wins keep
    /// their registration order.
    pub fn ranked(&self) -> Vec<(&PlayerName, &StandingRecord)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.wins.cmp(&a.1.wins));
        ranked
    }

    fn record(&self, name: &PlayerName) -> EngineResult<&StandingRecord> {
        self.records
            .get(name)
            .ok_or_else(|| EngineError::UnknownPlayer(name.clone()))
    }

    fn record_mut(&mut self, name: &PlayerName) -> EngineResult<&mut StandingRecord> {
        self.records
            .get_mut(name)
            .ok_or_else(|| EngineError::UnknownPlayer(name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker_with(names: &[&str]) -> StandingsTracker {
        let mut tracker = StandingsTracker::new();
        for name in names {
            tracker.initialize(PlayerName::new(name)).unwrap();
        }
        tracker
    }

    #[test]
    fn test_initialize_creates_zero_record() {
        let tracker = tracker_with(&["alice"]);
        assert_eq!(tracker.get("alice"), Some(&StandingRecord::default()));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_initialize_rejects_duplicates() {
        let mut tracker = tracker_with(&["alice"]);
        let result = tracker.initialize(PlayerName::new("alice"));
        assert_eq!(
            result,
            Err(EngineError::DuplicatePlayer(PlayerName::new("alice")))
        );
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_get_does_not_create_records() {
        let tracker = tracker_with(&["alice"]);
        assert!(tracker.get("bob").is_none());
        assert!(!tracker.contains("bob"));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_record_win_updates_both_players() {
        let mut tracker = tracker_with(&["alice", "bob"]);
        let (alice, bob) = (PlayerName::new("alice"), PlayerName::new("bob"));
        tracker.record_win(&alice, &bob).unwrap();

        let winner = tracker.get("alice").unwrap();
        assert_eq!(winner.wins, 1);
        assert_eq!(winner.points, 1);
        assert_eq!(winner.games, 1);
        assert_eq!(winner.consecutive_wins, 1);
        assert_eq!(
            winner.opponents,
            vec![OpponentEntry::new(bob.clone(), GameResult::Won)]
        );

        let loser = tracker.get("bob").unwrap();
        assert_eq!(loser.wins, 0);
        assert_eq!(loser.points, 0);
        assert_eq!(loser.games, 1);
        assert_eq!(loser.losses(), 1);
        assert_eq!(
            loser.opponents,
            vec![OpponentEntry::new(alice, GameResult::Lost)]
        );
    }

    #[test]
    fn test_loss_resets_streak() {
        let mut tracker = tracker_with(&["alice", "bob"]);
        let (alice, bob) = (PlayerName::new("alice"), PlayerName::new("bob"));
        tracker.record_win(&alice, &bob).unwrap();
        tracker.record_win(&alice, &bob).unwrap();
        assert_eq!(tracker.get("alice").unwrap().consecutive_wins, 2);

        tracker.record_win(&bob, &alice).unwrap();
        assert_eq!(tracker.get("alice").unwrap().consecutive_wins, 0);
        assert_eq!(tracker.get("bob").unwrap().consecutive_wins, 1);
    }

    #[test]
    fn test_record_win_with_unknown_player_changes_nothing() {
        let mut tracker = tracker_with(&["alice"]);
        let before = tracker.clone();
        let result = tracker.record_win(&PlayerName::new("alice"), &PlayerName::new("ghost"));
        assert_eq!(
            result,
            Err(EngineError::UnknownPlayer(PlayerName::new("ghost")))
        );
        assert_eq!(tracker, before);
    }

    #[test]
    fn test_streak_bonus() {
        let mut tracker = tracker_with(&["alice", "bob"]);
        let (alice, bob) = (PlayerName::new("alice"), PlayerName::new("bob"));
        tracker.record_win(&alice, &bob).unwrap();
        tracker.record_win(&alice, &bob).unwrap();
        tracker.apply_streak_bonus(&alice).unwrap();

        let record = tracker.get("alice").unwrap();
        assert_eq!(record.wins, 2);
        assert_eq!(record.points, 3);
        assert_eq!(record.consecutive_wins, 0);
    }

    #[test]
    fn test_record_win_overflow_changes_nothing() {
        let (alice, bob) = (PlayerName::new("alice"), PlayerName::new("bob"));
        let maxed = StandingRecord {
            wins: u32::MAX,
            points: u32::MAX,
            games: u32::MAX,
            ..StandingRecord::default()
        };
        let mut tracker = StandingsTracker::from_records([
            (alice.clone(), maxed.clone()),
            (bob.clone(), StandingRecord::default()),
        ])
        .unwrap();
        let before = tracker.clone();

        assert_eq!(
            tracker.record_win(&alice, &bob),
            Err(EngineError::RecordOverflow(alice.clone()))
        );
        assert_eq!(tracker, before);

        // The loser's game count overflowing blocks the winner's update too
        assert_eq!(
            tracker.record_win(&bob, &alice),
            Err(EngineError::RecordOverflow(alice.clone()))
        );
        assert_eq!(tracker, before);

        assert_eq!(
            tracker.apply_streak_bonus(&alice),
            Err(EngineError::RecordOverflow(alice))
        );
        assert_eq!(tracker, before);
    }

    #[test]
    fn test_record_win_keeps_room_for_bonus() {
        let (alice, bob) = (PlayerName::new("alice"), PlayerName::new("bob"));
        let nearly = StandingRecord {
            points: u32::MAX - 2,
            ..StandingRecord::default()
        };
        let mut tracker = StandingsTracker::from_records([
            (alice.clone(), nearly),
            (bob.clone(), StandingRecord::default()),
        ])
        .unwrap();

        tracker.record_win(&alice, &bob).unwrap();
        tracker.apply_streak_bonus(&alice).unwrap();
        assert_eq!(tracker.get("alice").unwrap().points, u32::MAX);
        assert!(tracker.record_win(&alice, &bob).is_err());
    }

    #[test]
    fn test_ranked_by_wins_with_stable_ties() {
        let mut tracker = tracker_with(&["a", "b", "c", "d"]);
        let name = PlayerName::new;
        tracker.record_win(&name("c"), &name("a")).unwrap();
        tracker.record_win(&name("d"), &name("b")).unwrap();
        tracker.record_win(&name("d"), &name("c")).unwrap();

        let ranked: Vec<&str> = tracker
            .ranked()
            .into_iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(ranked, vec!["d", "c", "a", "b"]);
    }

    #[test]
    fn test_from_records_keeps_order() {
        let tracker = StandingsTracker::from_records([
            (PlayerName::new("z"), StandingRecord::default()),
            (PlayerName::new("a"), StandingRecord::default()),
        ])
        .unwrap();
        let names: Vec<&str> = tracker.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["z", "a"]);
    }
}
