//! Configuration types for the engine.

use crate::{Direction, Error, Position, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Side length of the board in the reference game
pub const DEFAULT_BOARD_SIZE: i32 = 16;
/// Tick period of the reference game
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;
/// Length the snake grows toward at start and after a self-collision
pub const DEFAULT_TARGET_LENGTH: usize = 4;

/// Engine configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
    /// Width and height of the (square, toroidal) board
    pub board_size: i32,
    /// Target length at start and after a reset
    pub initial_length: usize,
    /// Food position before the first tick
    pub initial_food: Position,
    /// Single body segment before the first tick
    pub initial_head: Position,
    /// Pending direction before any command arrives
    pub initial_direction: Direction,
    /// Seed for food placement; entropy when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            board_size: DEFAULT_BOARD_SIZE,
            initial_length: DEFAULT_TARGET_LENGTH,
            initial_food: Position::new(5, 5),
            initial_head: Position::new(7, 7),
            initial_direction: Direction::RIGHT,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn new(tick_interval_ms: u64, board_size: i32) -> Self {
        Self {
            tick_interval_ms,
            board_size,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values the tick arithmetic cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.board_size <= 0 {
            return Err(Error::Validation(format!(
                "board_size must be positive, got {}",
                self.board_size
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::Validation(
                "tick_interval_ms must be non-zero".to_string(),
            ));
        }
        if self.initial_length == 0 {
            return Err(Error::Validation(
                "initial_length must be at least 1".to_string(),
            ));
        }
        for (name, pos) in [("initial_food", self.initial_food), ("initial_head", self.initial_head)] {
            if !self.on_board(pos) {
                return Err(Error::Validation(format!(
                    "{} {} lies outside a board of size {}",
                    name, pos, self.board_size
                )));
            }
        }
        Ok(())
    }

    fn on_board(&self, pos: Position) -> bool {
        (0..self.board_size).contains(&pos.x) && (0..self.board_size).contains(&pos.y)
    }
}

/// Configuration for the headless demo driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub engine: EngineConfig,
    /// Stop after this many snapshots; run until interrupted when absent
    pub max_ticks: Option<u64>,
    /// Pick a new random direction every this many ticks (0 keeps heading)
    pub steer_every: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            max_ticks: None,
            steer_every: 5,
        }
    }
}

impl DemoConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: DemoConfig = toml::from_str(s)?;
        config.engine.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let engine = EngineConfig::default();
        assert_eq!(engine.board_size, 16);
        assert_eq!(engine.tick_interval_ms, 150);
        assert_eq!(engine.initial_length, 4);
        assert_eq!(engine.initial_food, Position::new(5, 5));
        assert_eq!(engine.initial_head, Position::new(7, 7));
        assert_eq!(engine.initial_direction, Direction::RIGHT);
        assert!(engine.validate().is_ok());

        let demo = DemoConfig::default();
        assert_eq!(demo.max_ticks, None);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(EngineConfig::new(150, 0).validate().is_err());
        assert!(EngineConfig::new(150, -4).validate().is_err());
        assert!(EngineConfig::new(0, 16).validate().is_err());

        // default head (7, 7) does not fit on a 4x4 board
        assert!(matches!(
            EngineConfig::new(150, 4).validate(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = DemoConfig::from_toml_str(
            r#"
            max_ticks = 20

            [engine]
            tick_interval_ms = 50
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.max_ticks, Some(20));
        assert_eq!(config.steer_every, 5);
        assert_eq!(config.engine.tick_interval_ms, 50);
        assert_eq!(config.engine.board_size, 16);
        assert_eq!(config.engine.seed, Some(7));
    }

    #[test]
    fn test_example_config_parses() {
        let config = DemoConfig::from_toml_str(include_str!("../../../snake-demo.toml")).unwrap();
        assert_eq!(config.max_ticks, Some(200));
        assert_eq!(config.steer_every, 4);
        assert_eq!(config.engine.seed, Some(42));
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let err = DemoConfig::from_toml_str("[engine]\nboard_size = 0\n").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = DemoConfig::from_toml_str("max_ticks = \"lots\"").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
