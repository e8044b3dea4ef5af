//! Integration tests for undo
//!
//! Every accepted change can be stepped back exactly, and steps that were
//! rejected or ignored never show up in the history.

use king_table::{Effect, NoOp, TournamentEngine};

fn started() -> TournamentEngine {
    let mut engine = TournamentEngine::default();
    engine
        .start_tournament(["A", "B", "C", "D", "E"], 2, 2)
        .unwrap();
    engine
}

#[test]
fn test_undo_report_result_roundtrip() {
    let mut engine = started();
    let before = engine.snapshot();

    engine.report_result(0, "A").unwrap();
    engine.undo().unwrap();

    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_undo_add_player_roundtrip() {
    let mut engine = started();
    let before = engine.snapshot();

    engine.add_player("F").unwrap();
    engine.undo().unwrap();

    assert_eq!(engine.snapshot(), before);
    assert!(engine.record("F").is_none());
    assert!(engine.player_status("F").is_none());
}

#[test]
fn test_undo_remove_from_queue_roundtrip() {
    let mut engine = started();
    let before = engine.snapshot();

    engine.remove_from_queue(0).unwrap();
    engine.undo().unwrap();

    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_undo_streak_bonus() {
    let mut engine = TournamentEngine::default();
    engine.start_tournament(["A", "B", "C"], 1, 2).unwrap();
    engine.report_result(0, "A").unwrap();
    let before = engine.snapshot();

    engine.report_result(0, "A").unwrap();
    assert_eq!(engine.record("A").unwrap().points, 3);

    engine.undo().unwrap();
    assert_eq!(engine.snapshot(), before);
    let a = engine.record("A").unwrap();
    assert_eq!(a.points, 1);
    assert_eq!(a.consecutive_wins, 1);
}

#[test]
fn test_undo_steps_back_one_change_at_a_time() {
    let mut engine = started();
    let mut states = vec![engine.snapshot()];

    for winner in ["A", "C", "A"] {
        let index = engine
            .view()
            .active_matches
            .iter()
            .position(|m| m.involves(winner))
            .unwrap();
        engine.report_result(index, winner).unwrap();
        states.push(engine.snapshot());
    }
    engine.add_player("F").unwrap();
    states.push(engine.snapshot());

    states.pop();
    while let Some(expected) = states.pop() {
        assert_eq!(engine.undo(), Ok(Effect::Applied));
        assert_eq!(engine.snapshot(), expected);
    }
    assert_eq!(engine.undo(), Ok(Effect::Ignored(NoOp::NothingToUndo)));
}

#[test]
fn test_undo_then_continue() {
    let mut engine = started();
    engine.report_result(0, "A").unwrap();
    engine.undo().unwrap();

    engine.report_result(0, "B").unwrap();
    assert_eq!(engine.record("A").unwrap().wins, 0);
    assert_eq!(engine.record("B").unwrap().wins, 1);

    engine.undo().unwrap();
    assert_eq!(engine.record("B").unwrap().wins, 0);
    assert!(!engine.can_undo());
}

#[test]
fn test_undo_keeps_table_pool_consistent() {
    let mut engine = started();
    engine.report_result(1, "C").unwrap();
    engine.report_result(0, "A").unwrap();
    engine.undo().unwrap();
    engine.undo().unwrap();

    let state = engine.state().unwrap();
    assert_eq!(state.tables().available_count(), 0);
    engine.report_result(1, "D").unwrap();
    let tables: Vec<usize> = engine.view().active_matches.iter().map(|m| m.table).collect();
    assert_eq!(tables, vec![1, 2]);
}

#[test]
fn test_reset_forgets_history() {
    let mut engine = started();
    engine.report_result(0, "A").unwrap();
    engine.reset();

    assert_eq!(engine.undo(), Ok(Effect::Ignored(NoOp::NothingToUndo)));
    assert!(!engine.is_running());
}
