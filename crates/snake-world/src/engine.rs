//! Real-time engine: a background tick task plus direction commands.

use crate::observer::SnapshotStream;
use crate::simulation::Simulation;
use parking_lot::Mutex;
use snake_core::{Direction, EngineConfig, Error, Result, SnakeState};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, trace};

/// A running snake world.
///
/// Constructing an engine spawns its tick task on the current tokio runtime;
/// the first tick fires one interval later. Call [`Engine::shutdown`] to stop
/// it and wait for the task to finish. Dropping the engine also stops the
/// task, without waiting.
pub struct Engine {
    config: EngineConfig,
    direction: Arc<Mutex<Direction>>,
    snapshots: watch::Receiver<Option<SnakeState>>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Engine {
    /// Start an engine with the reference starting position.
    pub fn new(tick_interval_ms: u64, board_size: i32) -> Result<Self> {
        Self::start(EngineConfig::new(tick_interval_ms, board_size))
    }

    #[instrument(skip_all, fields(board_size = config.board_size, tick_interval_ms = config.tick_interval_ms))]
    pub fn start(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let runtime = Handle::try_current().map_err(|e| {
            Error::InvalidState(format!("engine must be started inside a tokio runtime: {}", e))
        })?;

        let direction = Arc::new(Mutex::new(config.initial_direction));
        let (tx, rx) = watch::channel(None);
        let cancel = CancellationToken::new();

        let handle = runtime.spawn(run_tick_loop(
            Simulation::new(&config),
            Duration::from_millis(config.tick_interval_ms),
            direction.clone(),
            tx,
            cancel.clone(),
        ));

        info!("Engine started");

        Ok(Self {
            config,
            direction,
            snapshots: rx,
            cancel,
            handle: Some(handle),
        })
    }

    /// Replace the pending direction; the next tick moves this way.
    ///
    /// Never waits for a tick. Several calls between two ticks collapse to the
    /// last one.
    pub fn set_direction(&self, direction: Direction) {
        *self.direction.lock() = direction;
        trace!(dx = direction.dx, dy = direction.dy, "Direction set");
    }

    /// Direction the next tick will use, as of now
    pub fn direction(&self) -> Direction {
        *self.direction.lock()
    }

    /// Subscribe to the snapshot stream.
    ///
    /// The first value a new stream yields is the most recent snapshot already
    /// published, if any tick has run; after that it follows live ticks.
    pub fn observe(&self) -> SnapshotStream {
        SnapshotStream::new(self.snapshots.clone())
    }

    /// Latest published snapshot; `None` until the first tick has run
    pub fn latest(&self) -> Option<SnakeState> {
        self.snapshots.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Stop the tick loop and wait for it to exit.
    ///
    /// Once this returns no further tick runs and every [`SnapshotStream`]
    /// terminates after yielding what it has not yet seen.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    error!("Tick task panicked: {}", e);
                }
            }
        }

        info!("Engine stopped");
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn run_tick_loop(
    mut simulation: Simulation,
    period: Duration,
    direction: Arc<Mutex<Direction>>,
    snapshots: watch::Sender<Option<SnakeState>>,
    cancel: CancellationToken,
) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        let heading = *direction.lock();
        let outcome = simulation.step(heading);
        snapshots.send_replace(Some(outcome.state));
    }

    debug!(ticks = simulation.tick(), "Tick loop exited");
}
