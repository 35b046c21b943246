use core::fmt;
use smallvec::SmallVec;

/// A discrete grid coordinate. Rows grow downwards and columns grow to the right.
///
/// Coordinates are signed so that stepping off the border produces a representable
/// [Cell] that the bounds check rejects, instead of wrapping around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// Sum of the absolute coordinate differences.
    pub fn manhattan_distance(&self, other: &Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    pub fn step(&self, dir: Direction) -> Cell {
        let (d_row, d_col) = dir.delta();
        Cell::new(self.row + d_row, self.col + d_col)
    }

    /// The 4-neighbourhood in [Direction::ALL] order, without any bounds filtering.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Cell; 4]> {
        Direction::ALL.iter().map(|&dir| self.step(dir)).collect()
    }

    /// True if `other` is exactly one unit step away along exactly one axis.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Cell {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four cardinal moves. The declaration order is the expansion order and therefore
/// influences which of several equally short paths is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// `(row, col)` offset of a single step.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
        }
    }

    /// The direction leading from `from` to the adjacent cell `to`, if they are adjacent.
    pub fn between(from: &Cell, to: &Cell) -> Option<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .find(|&dir| from.step(dir) == *to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_unit() {
        assert_eq!(Cell::new(0, 0).manhattan_distance(&Cell::new(3, 4)), 7);
        assert_eq!(Cell::new(3, 4).manhattan_distance(&Cell::new(0, 0)), 7);
        assert_eq!(Cell::new(2, 2).manhattan_distance(&Cell::new(2, 2)), 0);
    }

    /// The neighbourhood order is right, down, left, up.
    #[test]
    fn neighbourhood_order() {
        let n = Cell::new(5, 5).neumann_neighborhood();
        assert_eq!(
            n.as_slice(),
            &[
                Cell::new(5, 6),
                Cell::new(6, 5),
                Cell::new(5, 4),
                Cell::new(4, 5)
            ]
        );
    }

    #[test]
    fn direction_between() {
        let c = Cell::new(1, 1);
        for dir in Direction::ALL {
            let n = c.step(dir);
            assert!(c.is_adjacent(&n));
            assert_eq!(Direction::between(&c, &n), Some(dir));
            assert_eq!(n.step(dir.opposite()), c);
        }
        assert_eq!(Direction::between(&c, &Cell::new(2, 2)), None);
    }

    #[test]
    fn cell_order_is_row_major() {
        assert!(Cell::new(0, 9) < Cell::new(1, 0));
        assert!(Cell::new(1, 0) < Cell::new(1, 1));
    }
}
