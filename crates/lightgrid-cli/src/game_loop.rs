use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;

use lightgrid_engine::series::SeriesTally;
use lightgrid_engine::{
    Direction, EngineError, MatchConfig, MatchEngine, MatchSnapshot, MatchState, PlayerId,
};

use crate::render::FrameSink;

/// Commands sent from the input reader to the tick loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    SetDirection {
        player_id: PlayerId,
        direction: Direction,
    },
    Stop,
}

/// Why a match loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Finished(MatchState),
    Stopped,
}

/// One finished (or abandoned) round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundSummary {
    pub round: u32,
    pub snapshot: MatchSnapshot,
}

/// Everything a series run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeriesReport {
    pub tally: SeriesTally,
    pub rounds: Vec<RoundSummary>,
    pub stopped: bool,
}

/// Drive one match until it ends or a `Stop` arrives.
///
/// Commands are applied as they arrive between ticks; each tick runs exactly
/// one `step()` and forwards the cell writes to `sink`.
pub async fn run_match<S: FrameSink>(
    engine: &mut MatchEngine,
    tick_interval: Duration,
    cmd_rx: &mut mpsc::UnboundedReceiver<GameCommand>,
    sink: &mut S,
) -> LoopExit {
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut input_open = true;

    loop {
        tokio::select! {
            biased;

            cmd = cmd_rx.recv(), if input_open => {
                match cmd {
                    Some(GameCommand::SetDirection { player_id, direction }) => {
                        engine.set_direction(player_id, direction);
                    },
                    Some(GameCommand::Stop) => {
                        tracing::info!(tick = engine.tick(), "Match stopped by input");
                        return LoopExit::Stopped;
                    },
                    None => {
                        tracing::debug!("Input closed, match continues without steering");
                        input_open = false;
                    },
                }
            },
            _ = interval.tick() => {
                match engine.step() {
                    Ok(deltas) => sink.paint_cells(&deltas),
                    Err(e) => {
                        tracing::warn!(error = %e, "Step rejected");
                    },
                }
                let state = engine.state();
                if state.is_terminal() {
                    sink.finish(state);
                    return LoopExit::Finished(state);
                }
            },
        }
    }
}

/// Config for round `round` (1-based) of a series.
///
/// A fixed seed is offset by the round number so each round's placement draws
/// differ while the whole series stays reproducible.
pub fn round_config(config: &MatchConfig, round: u32) -> MatchConfig {
    MatchConfig {
        seed: config
            .seed
            .map(|seed| seed.wrapping_add(u64::from(round.saturating_sub(1)))),
        ..config.clone()
    }
}

/// Play `config.rounds` matches back to back, tallying the outcomes.
pub async fn run_series<S: FrameSink>(
    config: &MatchConfig,
    cmd_rx: &mut mpsc::UnboundedReceiver<GameCommand>,
    sink: &mut S,
) -> Result<SeriesReport, EngineError> {
    let mut report = SeriesReport::default();
    let tick_interval = config.tick_interval();

    for round in 1..=config.rounds {
        let mut engine = MatchEngine::new(&round_config(config, round))?;
        tracing::info!(round, rounds = config.rounds, "Round starting");
        sink.paint_full(engine.grid());

        let exit = run_match(&mut engine, tick_interval, cmd_rx, sink).await;
        report.tally.record(engine.state());
        report.rounds.push(RoundSummary {
            round,
            snapshot: engine.snapshot(),
        });

        if exit == LoopExit::Stopped {
            report.stopped = true;
            break;
        }
    }

    tracing::info!(
        wins_a = report.tally.wins_a,
        wins_b = report.tally.wins_b,
        ties = report.tally.ties,
        "Series complete"
    );
    Ok(report)
}
