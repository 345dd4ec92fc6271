//! The tick rule: one synchronous step of the snake world.

use crate::grid::{self, Grid};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_core::{Direction, EngineConfig, SnakeState};
use std::iter;
use tracing::{debug, trace};

/// What a single tick produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    /// Number of the tick that produced `state`, starting at 1
    pub tick: u64,
    pub state: SnakeState,
    pub ate_food: bool,
    pub self_collision: bool,
}

/// Snake world state advanced one tick at a time.
///
/// Holds no timer and no locks; [`crate::Engine`] owns one of these inside its
/// tick task.
pub struct Simulation {
    grid: Grid,
    state: SnakeState,
    target_length: usize,
    reset_length: usize,
    rng: ChaCha8Rng,
    tick: u64,
}

impl Simulation {
    pub fn new(config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            grid: Grid::new(config.board_size),
            state: SnakeState::new(config.initial_food, vec![config.initial_head]),
            target_length: config.initial_length,
            reset_length: config.initial_length,
            rng,
            tick: 0,
        }
    }

    pub fn state(&self) -> &SnakeState {
        &self.state
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Ticks executed so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance one tick moving in `direction`.
    ///
    /// Collision is tested against the whole body before this tick's move,
    /// including the tail cell that is about to be vacated. When food and a
    /// collision coincide the collision reset wins.
    pub fn step(&mut self, direction: Direction) -> TickOutcome {
        self.tick += 1;

        let current = &self.state;
        let new_head = self.grid.advance(current.head(), direction);
        let ate_food = new_head == current.food;
        let self_collision = grid::contains(&current.snake, new_head);

        if ate_food {
            self.target_length += 1;
            debug!(
                tick = self.tick,
                head = %new_head,
                target_length = self.target_length,
                "Food eaten"
            );
        }
        if self_collision {
            debug!(
                tick = self.tick,
                head = %new_head,
                previous_target = self.target_length,
                "Self collision, resetting length"
            );
            self.target_length = self.reset_length;
        }

        let snake: Vec<_> = iter::once(new_head)
            .chain(current.snake.iter().take(self.target_length - 1).copied())
            .collect();

        let food = if ate_food {
            self.grid.random_position(&mut self.rng)
        } else {
            current.food
        };

        self.state = SnakeState::new(food, snake);

        trace!(
            tick = self.tick,
            head = %new_head,
            length = self.state.len(),
            food = %self.state.food,
            "Tick"
        );

        TickOutcome {
            tick: self.tick,
            state: self.state.clone(),
            ate_food,
            self_collision,
        }
    }
}
