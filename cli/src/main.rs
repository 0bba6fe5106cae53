use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use gridbox_core::{FrameOutcome, RandomPlacementGenerator, Session};

use config::AppConfig;
use export::ExportFiles;
use host::HeadlessHost;

mod config;
mod export;
mod host;
mod svg;

/// Scatters random boxes over a labeled grid, reveals them one by one, then saves their
/// placements and a snapshot of the board
#[derive(Parser, Debug)]
#[command(name = "gridbox", version, about)]
struct Args {
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// TOML file with `[sketch]` and `[output]` tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output directory for placements.txt, placements.json and the board snapshot, which
    /// is written as board_snapshot.svg (not PNG). Overrides the config file
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Frames per second of the reveal loop, 0 runs without waiting
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Number of generation cycles to run
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    rounds: u32,
}

fn init_logging(verbose: &Verbosity<InfoLevel>) {
    let mut builder = if std::env::var_os("RUST_LOG").is_some() {
        env_logger::Builder::from_default_env()
    } else {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(verbose.log_level_filter());
        builder
    };
    builder.init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(out) = args.out {
        config.output.dir = out;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed: {seed}");

    let files = ExportFiles::new(config.output.dir, config.output.json);
    let mut host = HeadlessHost::new(files, true)?;
    let mut session = Session::new(config.sketch, RandomPlacementGenerator::new(seed))
        .context("Could not start the sketch")?;
    session.greet(&mut host);

    let frame_time = (args.fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(args.fps)));
    let mut failed_rounds = 0;

    for round in 1..=args.rounds {
        if round > 1 {
            session.restart()?;
        }
        host.begin_round((args.rounds > 1).then_some(round));
        log::debug!("Round {round}/{} started", args.rounds);

        loop {
            match session.frame(&mut host) {
                Ok(FrameOutcome::Exported) => break,
                Ok(FrameOutcome::Revealed) => log::debug!(
                    "{}/{} boxes visible",
                    session.controller().shown(),
                    session.controller().batch().len()
                ),
                Ok(FrameOutcome::Idle) => {}
                Err(err) => {
                    log::error!("Round {round}: {err}");
                    failed_rounds += 1;
                    break;
                }
            }
            if let Some(frame_time) = frame_time {
                thread::sleep(frame_time);
            }
        }
    }

    log::info!("Exported {} files to {}", host.written().len(), host.dir().display());
    anyhow::ensure!(
        failed_rounds == 0,
        "{failed_rounds} of {} rounds could not be exported",
        args.rounds
    );
    Ok(())
}
