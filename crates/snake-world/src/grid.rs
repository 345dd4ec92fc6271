//! Toroidal board arithmetic.

use rand::Rng;
use snake_core::{Direction, Position};

/// Wrap a coordinate onto `[0, size)`, negative inputs included.
pub fn wrap(coord: i32, size: i32) -> i32 {
    coord.rem_euclid(size)
}

/// Move `position` by `direction`, wrapping each axis independently.
///
/// Any component values are accepted; the sum is taken in `i64` so it cannot
/// overflow before wrapping.
pub fn advance(position: Position, direction: Direction, size: i32) -> Position {
    let (dx, dy) = direction.to_delta();
    Position::new(shift(position.x, dx, size), shift(position.y, dy, size))
}

fn shift(coord: i32, delta: i32, size: i32) -> i32 {
    // Result lies in [0, size), so it fits back into i32
    (i64::from(coord) + i64::from(delta)).rem_euclid(i64::from(size)) as i32
}

/// Whether `candidate` occupies any cell of `body`.
pub fn contains(body: &[Position], candidate: Position) -> bool {
    body.iter().any(|segment| *segment == candidate)
}

/// Uniformly random cell. Does not look at what already occupies it.
pub fn random_position<R: Rng + ?Sized>(size: i32, rng: &mut R) -> Position {
    Position::new(rng.gen_range(0..size), rng.gen_range(0..size))
}

/// A square toroidal board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub size: i32,
}

impl Grid {
    pub fn new(size: i32) -> Self {
        Self { size }
    }

    /// Position after one step in `direction` (with toroidal wrapping)
    pub fn advance(&self, position: Position, direction: Direction) -> Position {
        advance(position, direction, self.size)
    }

    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        random_position(self.size, rng)
    }

    pub fn contains_cell(&self, pos: Position) -> bool {
        (0..self.size).contains(&pos.x) && (0..self.size).contains(&pos.y)
    }

    /// Iterator over all cells, row by row
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_toroidal_wrapping() {
        assert_eq!(wrap(5, 16), 5);
        assert_eq!(wrap(-1, 16), 15);
        assert_eq!(wrap(16, 16), 0);
        assert_eq!(wrap(-17, 16), 15);

        let grid = Grid::new(16);
        assert_eq!(grid.advance(Position::new(15, 0), Direction::RIGHT), Position::new(0, 0));
        assert_eq!(grid.advance(Position::new(0, 0), Direction::UP), Position::new(0, 15));
        assert_eq!(grid.advance(Position::new(0, 3), Direction::LEFT), Position::new(15, 3));
        assert_eq!(grid.advance(Position::new(4, 15), Direction::DOWN), Position::new(4, 0));
    }

    #[test]
    fn test_advance_extreme_components() {
        let grid = Grid::new(16);
        // i32::MAX = 16 * k + 15, i32::MIN = 16 * k' + 0
        assert_eq!(
            grid.advance(Position::new(7, 7), Direction::new(i32::MAX, i32::MIN)),
            Position::new(6, 7)
        );
        assert_eq!(
            grid.advance(Position::new(15, 0), Direction::new(i32::MIN, i32::MAX)),
            Position::new(15, 15)
        );
    }

    #[test]
    fn test_contains() {
        let body = vec![Position::new(7, 7), Position::new(6, 7)];
        assert!(contains(&body, Position::new(6, 7)));
        assert!(!contains(&body, Position::new(8, 7)));
        assert!(!contains(&[], Position::new(0, 0)));
    }

    #[test]
    fn test_random_position_stays_on_board() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let grid = Grid::new(16);
        for _ in 0..1000 {
            assert!(grid.contains_cell(grid.random_position(&mut rng)));
        }
    }

    #[test]
    fn test_positions_cover_board() {
        let grid = Grid::new(4);
        let cells: Vec<_> = grid.positions().collect();
        assert_eq!(cells.len(), 16);
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[5], Position::new(1, 1));
    }

    proptest! {
        #[test]
        fn test_wrap_in_range(x in any::<i32>(), size in 1..1024i32) {
            let wrapped = wrap(x, size);
            prop_assert!((0..size).contains(&wrapped));
        }

        #[test]
        fn test_wrap_is_periodic(x in -1_000_000..1_000_000i32, size in 1..1024i32) {
            prop_assert_eq!(wrap(x, size), wrap(x + size, size));
        }

        #[test]
        fn test_advance_never_overflows(
            x in 0..16i32,
            y in 0..16i32,
            dx in any::<i32>(),
            dy in any::<i32>(),
        ) {
            let moved = advance(Position::new(x, y), Direction::new(dx, dy), 16);
            prop_assert!(Grid::new(16).contains_cell(moved));
        }

        #[test]
        fn test_advance_inverse(
            x in 0..16i32,
            y in 0..16i32,
            idx in 0..4usize,
        ) {
            let p = Position::new(x, y);
            let d = Direction::CARDINAL[idx];
            prop_assert_eq!(advance(advance(p, d, 16), d.negate(), 16), p);
        }
    }
}
