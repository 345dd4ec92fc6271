//! Stand-in for a presentation layer: picks turns and draws snapshots as text.

use rand::seq::SliceRandom;
use rand::Rng;
use snake_core::{Direction, SnakeState};
use snake_world::Grid;

/// Random cardinal direction other than straight back into the neck.
pub fn pick_turn<R: Rng + ?Sized>(current: Direction, rng: &mut R) -> Direction {
    let options: Vec<Direction> = Direction::CARDINAL
        .into_iter()
        .filter(|d| *d != current.negate())
        .collect();

    options.choose(rng).copied().unwrap_or(current)
}

/// One line per row: `@` head, `o` body, `*` food, `.` empty.
pub fn render(state: &SnakeState, grid: Grid) -> String {
    let mut out = String::with_capacity(board_capacity(grid));

    for pos in grid.positions() {
        let cell = if pos == state.head() {
            '@'
        } else if state.snake.contains(&pos) {
            'o'
        } else if pos == state.food {
            '*'
        } else {
            '.'
        };
        out.push(cell);

        if pos.x == grid.size - 1 {
            out.push('\n');
        }
    }

    out
}

/// Bytes needed for a rendered board, newlines included.
fn board_capacity(grid: Grid) -> usize {
    let side = usize::try_from(grid.size).unwrap_or(0);
    side.saturating_add(1).saturating_mul(side)
}
