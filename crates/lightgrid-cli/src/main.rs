use std::io::BufRead;
use std::process::ExitCode;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use lightgrid_cli::args::CliArgs;
use lightgrid_cli::game_loop::{GameCommand, run_series};
use lightgrid_cli::input::parse_line;
use lightgrid_cli::render::AsciiFrame;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            tracing::error!(error = %e, "Bad command line");
            return ExitCode::from(2);
        },
    };
    let config = args.load_config();
    tracing::info!(
        height = config.grid_height,
        width = config.grid_width,
        tick_rate = config.tick_rate,
        rounds = config.rounds,
        "Lightgrid starting"
    );

    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
    // A plain thread so a pending stdin read never holds up runtime shutdown.
    std::thread::spawn(move || read_input(cmd_tx));

    let mut sink = AsciiFrame::new(std::io::stdout(), args.live);
    let report = match run_series(&config, &mut cmd_rx, &mut sink).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "Match could not start");
            return ExitCode::FAILURE;
        },
    };

    if args.json {
        match serde_json::to_string(&report) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::error!(error = %e, "Failed to encode report"),
        }
    } else {
        let tally = report.tally;
        println!(
            "A {} - {} B ({} tied, {} played)",
            tally.wins_a,
            tally.wins_b,
            tally.ties,
            tally.rounds_played()
        );
    }

    ExitCode::SUCCESS
}

/// Forward stdin lines to the tick loop as commands.
fn read_input(cmd_tx: mpsc::UnboundedSender<GameCommand>) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "Stdin read failed");
                return;
            },
        };
        match parse_line(&line) {
            Ok(commands) => {
                for cmd in commands {
                    if cmd_tx.send(cmd).is_err() {
                        return;
                    }
                }
            },
            Err(e) => tracing::warn!(error = %e, "Ignored input"),
        }
    }
}
