//! Core type definitions for the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Movement vector applied to the head once per tick.
///
/// Only the four unit vectors are produced by the named constants, but any
/// pair is representable and the engine moves by whatever it is given.
/// Screen coordinates: `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const UP: Direction = Direction { dx: 0, dy: -1 };
    pub const DOWN: Direction = Direction { dx: 0, dy: 1 };
    pub const LEFT: Direction = Direction { dx: -1, dy: 0 };
    pub const RIGHT: Direction = Direction { dx: 1, dy: 0 };

    pub const CARDINAL: [Direction; 4] = [
        Direction::UP,
        Direction::DOWN,
        Direction::LEFT,
        Direction::RIGHT,
    ];

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn to_delta(&self) -> (i32, i32) {
        (self.dx, self.dy)
    }

    /// The opposite vector
    pub fn negate(&self) -> Self {
        Self {
            dx: self.dx.wrapping_neg(),
            dy: self.dy.wrapping_neg(),
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::RIGHT
    }
}

/// Snapshot published once per tick.
///
/// Always replaced wholesale, never patched in place, so observers can hold on
/// to one for as long as they like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeState {
    pub food: Position,
    /// Head first, tail last. Never empty.
    pub snake: Vec<Position>,
}

impl SnakeState {
    pub fn new(food: Position, snake: Vec<Position>) -> Self {
        debug_assert!(!snake.is_empty(), "snake body must not be empty");
        Self { food, snake }
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }
}
