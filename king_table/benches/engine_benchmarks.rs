use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use king_table::{Snapshot, TournamentEngine};
use std::hint::black_box;

/// Helper to start a tournament with N players spread over as many tables
/// as they fill
fn setup_tournament(n_players: usize) -> TournamentEngine {
    let names: Vec<String> = (0..n_players).map(|i| format!("player{i}")).collect();
    let mut engine = TournamentEngine::default();
    engine
        .start_tournament(&names, (n_players / 2) as i64, 3)
        .unwrap();
    engine
}

/// Report results for the first match, alternating which side wins
fn play_rounds(engine: &mut TournamentEngine, rounds: usize) {
    for round in 0..rounds {
        let view = engine.view();
        let game = &view.active_matches[0];
        let winner = if round % 3 == 0 { &game.player2 } else { &game.player1 };
        engine.report_result(0, winner.as_str()).unwrap();
    }
}

/// Benchmark a single reported result at different tournament sizes
fn bench_report_result(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_result");

    for n_players in [4, 16, 64] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_players", n_players)),
            &n_players,
            |b, &n| {
                b.iter_batched(
                    || setup_tournament(n),
                    |mut engine| {
                        engine.report_result(0, "player0").unwrap();
                        engine
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark a long evening of play on a crowded floor
fn bench_long_session(c: &mut Criterion) {
    c.bench_function("long_session_64_players_500_results", |b| {
        b.iter_batched(
            || setup_tournament(64),
            |mut engine| {
                play_rounds(&mut engine, 500);
                engine
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark building the presentation view
fn bench_view(c: &mut Criterion) {
    let mut engine = setup_tournament(64);
    play_rounds(&mut engine, 200);

    c.bench_function("view_64_players", |b| {
        b.iter(|| black_box(engine.view()));
    });
}

/// Benchmark undo after a played result
fn bench_undo(c: &mut Criterion) {
    let mut engine = setup_tournament(64);
    play_rounds(&mut engine, 100);

    c.bench_function("report_then_undo_64_players", |b| {
        b.iter(|| {
            let winner = engine.view().active_matches[0].player1.clone();
            engine.report_result(0, winner.as_str()).unwrap();
            engine.undo().unwrap();
        });
    });
}

/// Benchmark snapshot serialization and restore
fn bench_snapshot_json(c: &mut Criterion) {
    let mut engine = setup_tournament(64);
    play_rounds(&mut engine, 200);
    let snapshot = engine.snapshot().unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();

    c.bench_function("snapshot_to_json", |b| {
        b.iter(|| serde_json::to_string(black_box(&snapshot)).unwrap());
    });

    c.bench_function("snapshot_restore_from_json", |b| {
        b.iter(|| {
            let snapshot: Snapshot = serde_json::from_str(black_box(&json)).unwrap();
            let mut restored = TournamentEngine::default();
            restored.restore(snapshot).unwrap();
            restored
        });
    });
}

criterion_group!(scheduling, bench_report_result, bench_long_session, bench_undo);

criterion_group!(presentation, bench_view, bench_snapshot_json);

criterion_main!(scheduling, presentation);
