//! Headless driver for the snake engine.
//!
//! Runs an engine, steers it at random and logs every snapshot until
//! interrupted or the tick budget runs out.

mod driver;
mod telemetry;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_core::DemoConfig;
use snake_world::{Engine, Grid};
use std::path::PathBuf;
use tokio::signal;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Steer {
    /// Turn at random every few ticks
    Random,
    /// Keep the starting heading
    Still,
}

#[derive(Debug, Parser)]
#[command(name = "snake-demo", version, about = "Run the snake engine headless and log its snapshots")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    tick_ms: Option<u64>,

    #[arg(long)]
    board_size: Option<i32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many snapshots
    #[arg(long)]
    ticks: Option<u64>,

    #[arg(long, value_enum)]
    steer: Option<Steer>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn load_config(&self) -> Result<DemoConfig> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => DemoConfig::default(),
        };

        if let Some(tick_ms) = self.tick_ms {
            config.engine.tick_interval_ms = tick_ms;
        }
        if let Some(board_size) = self.board_size {
            config.engine.board_size = board_size;
        }
        if let Some(seed) = self.seed {
            config.engine.seed = Some(seed);
        }
        if let Some(ticks) = self.ticks {
            config.max_ticks = Some(ticks);
        }
        if self.steer == Some(Steer::Still) {
            config.steer_every = 0;
        }

        config.engine.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_telemetry(cli.json_logs)?;

    let config = cli.load_config()?;
    info!(
        board_size = config.engine.board_size,
        tick_interval_ms = config.engine.tick_interval_ms,
        max_ticks = ?config.max_ticks,
        "Starting snake demo"
    );

    let mut rng = match config.engine.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        None => ChaCha8Rng::from_entropy(),
    };
    let engine = Engine::start(config.engine.clone())?;
    let grid = Grid::new(engine.config().board_size);
    let mut stream = engine.observe();

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut seen: u64 = 0;
    let mut longest = 0;

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            next = stream.next() => {
                let Some(state) = next else {
                    warn!("Snapshot stream terminated");
                    break;
                };

                seen += 1;
                longest = longest.max(state.len());

                info!(tick = seen, snapshot = %serde_json::to_string(&state)?, "Snapshot");
                debug!("\n{}", driver::render(&state, grid));

                if config.steer_every > 0 && seen % config.steer_every == 0 {
                    engine.set_direction(driver::pick_turn(engine.direction(), &mut rng));
                }

                if config.max_ticks.is_some_and(|max| seen >= max) {
                    info!("Tick budget reached");
                    break;
                }
            }
        }
    }

    engine.shutdown().await;
    info!(ticks = seen, longest, "Snake demo finished");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
