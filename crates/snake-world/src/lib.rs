//! Snake world: grid arithmetic, the tick rule and the real-time engine.
//!
//! [`Simulation`] is the synchronous tick rule. [`Engine`] drives it from a
//! background tokio task and publishes every snapshot to [`SnapshotStream`]s.

pub mod grid;
pub mod simulation;
pub mod engine;
pub mod observer;

pub use grid::Grid;
pub use simulation::{Simulation, TickOutcome};
pub use engine::Engine;
pub use observer::SnapshotStream;
