//! Tick-loop tests: commands, pacing and sink output against a real engine.

use std::time::Duration;

use tokio::sync::mpsc;

use lightgrid_cli::args::CliArgs;
use lightgrid_cli::game_loop::{GameCommand, LoopExit, round_config, run_match, run_series};
use lightgrid_cli::render::{AsciiFrame, FrameSink};
use lightgrid_engine::test_helpers::corner_engine_5x5;
use lightgrid_engine::{CellDelta, Direction, Grid, MatchConfig, MatchState, PlayerId};

const FAST: Duration = Duration::from_millis(1);

/// Records every call the loop makes.
#[derive(Default)]
struct RecordingSink {
    full_paints: usize,
    ticks: Vec<Vec<CellDelta>>,
    finished: Option<MatchState>,
}

impl FrameSink for RecordingSink {
    fn paint_full(&mut self, _grid: &Grid) {
        self.full_paints += 1;
    }

    fn paint_cells(&mut self, deltas: &[CellDelta]) {
        self.ticks.push(deltas.to_vec());
    }

    fn finish(&mut self, state: MatchState) {
        self.finished = Some(state);
    }
}

fn small_config(rounds: u32) -> MatchConfig {
    MatchConfig {
        grid_height: 5,
        grid_width: 5,
        tick_rate: 1000.0,
        seed: Some(1),
        rounds,
        ..MatchConfig::default()
    }
}

#[tokio::test]
async fn unsteered_corner_match_ties_on_the_fifth_tick() {
    let mut engine = corner_engine_5x5();
    let (_tx, mut rx) = mpsc::unbounded_channel();
    let mut sink = RecordingSink::default();

    let exit = run_match(&mut engine, FAST, &mut rx, &mut sink).await;

    // Both wrap around their row and hit their own starting trail together.
    assert_eq!(exit, LoopExit::Finished(MatchState::Tie));
    assert_eq!(engine.tick(), 5);
    assert_eq!(sink.ticks.len(), 5);
    assert!(sink.ticks.iter().all(|d| d.len() == 4));
    assert_eq!(sink.finished, Some(MatchState::Tie));
}

#[tokio::test]
async fn queued_direction_applies_before_first_tick() {
    let mut engine = corner_engine_5x5();
    let (tx, mut rx) = mpsc::unbounded_channel();
    tx.send(GameCommand::SetDirection {
        player_id: PlayerId::A,
        direction: Direction::Down,
    })
    .unwrap();
    let mut sink = RecordingSink::default();

    let exit = run_match(&mut engine, FAST, &mut rx, &mut sink).await;

    // A runs down column 0 and meets B at (4,0) on tick 4.
    assert_eq!(exit, LoopExit::Finished(MatchState::Tie));
    assert_eq!(engine.tick(), 4);
    assert_eq!(engine.player(PlayerId::A).direction(), Direction::Down);
}

#[tokio::test]
async fn stop_ends_the_match_without_stepping() {
    let mut engine = corner_engine_5x5();
    let (tx, mut rx) = mpsc::unbounded_channel();
    tx.send(GameCommand::Stop).unwrap();
    let mut sink = RecordingSink::default();

    let exit = run_match(&mut engine, FAST, &mut rx, &mut sink).await;

    assert_eq!(exit, LoopExit::Stopped);
    assert_eq!(engine.tick(), 0);
    assert!(sink.ticks.is_empty());
    assert_eq!(sink.finished, None);
}

#[tokio::test]
async fn closed_input_does_not_stall_the_loop() {
    let mut engine = corner_engine_5x5();
    let (tx, mut rx) = mpsc::unbounded_channel::<GameCommand>();
    drop(tx);
    let mut sink = RecordingSink::default();

    let exit = tokio::time::timeout(
        Duration::from_secs(5),
        run_match(&mut engine, FAST, &mut rx, &mut sink),
    )
    .await
    .expect("loop should finish on its own");

    assert_eq!(exit, LoopExit::Finished(MatchState::Tie));
}

#[tokio::test]
async fn series_tallies_every_round() {
    let (_tx, mut rx) = mpsc::unbounded_channel();
    let mut sink = RecordingSink::default();

    let report = run_series(&small_config(3), &mut rx, &mut sink)
        .await
        .unwrap();

    assert_eq!(report.tally.ties, 3);
    assert_eq!(report.tally.rounds_played(), 3);
    assert_eq!(report.rounds.len(), 3);
    assert!(!report.stopped);
    assert_eq!(sink.full_paints, 3);
    assert_eq!(report.rounds[2].round, 3);
    assert_eq!(report.rounds[2].snapshot.state, MatchState::Tie);
}

#[tokio::test]
async fn series_stops_early_on_stop() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    tx.send(GameCommand::Stop).unwrap();
    let mut sink = RecordingSink::default();

    let report = run_series(&small_config(4), &mut rx, &mut sink)
        .await
        .unwrap();

    assert!(report.stopped);
    assert_eq!(report.rounds.len(), 1);
    assert_eq!(report.tally.rounds_played(), 0);
    assert_eq!(report.rounds[0].snapshot.state, MatchState::InProgress);
}

#[tokio::test]
async fn series_reports_setup_failure() {
    let config = MatchConfig {
        grid_height: 1,
        grid_width: 1,
        ..small_config(1)
    };
    let (_tx, mut rx) = mpsc::unbounded_channel();
    let mut sink = RecordingSink::default();

    let err = run_series(&config, &mut rx, &mut sink).await.unwrap_err();
    assert_eq!(
        err,
        lightgrid_engine::EngineError::NoSpaceAvailable { attempts: 100 }
    );
}

#[tokio::test]
async fn infinite_tick_rate_from_flags_still_runs() {
    let args = CliArgs::parse(["--tick-rate=inf".to_string()]).unwrap();
    let mut config = small_config(1);
    args.apply(&mut config);
    assert!(config.tick_rate.is_infinite());

    let (_tx, mut rx) = mpsc::unbounded_channel();
    let mut sink = RecordingSink::default();
    let report = run_series(&config, &mut rx, &mut sink).await.unwrap();

    assert_eq!(report.tally.ties, 1);
}

#[test]
fn seeded_series_varies_the_seed_per_round() {
    let config = small_config(3);
    let seeds: Vec<_> = (1..=3).map(|r| round_config(&config, r).seed).collect();
    assert_eq!(seeds, vec![Some(1), Some(2), Some(3)]);

    let unseeded = MatchConfig {
        seed: None,
        ..config
    };
    assert_eq!(round_config(&unseeded, 2).seed, None);
    assert_eq!(round_config(&unseeded, 2).grid_width, 5);
}

#[test]
fn seeded_series_wraps_at_the_top_of_the_seed_range() {
    let config = MatchConfig {
        seed: Some(u64::MAX),
        ..small_config(2)
    };
    assert_eq!(round_config(&config, 2).seed, Some(0));
}

#[tokio::test]
async fn report_serializes_to_json() {
    let (_tx, mut rx) = mpsc::unbounded_channel();
    let mut sink = RecordingSink::default();
    let report = run_series(&small_config(1), &mut rx, &mut sink)
        .await
        .unwrap();

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["tally"]["ties"], 1);
    assert_eq!(value["rounds"][0]["snapshot"]["state"], "Tie");
}

#[tokio::test]
async fn ascii_sink_shows_final_board() {
    let mut engine = corner_engine_5x5();
    let (_tx, mut rx) = mpsc::unbounded_channel();
    let mut sink = AsciiFrame::new(Vec::new(), false);
    sink.paint_full(engine.grid());

    run_match(&mut engine, FAST, &mut rx, &mut sink).await;

    let out = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(out, "Xaaaa\n.....\n.....\n.....\nbbbbX\ntie\n");
}
