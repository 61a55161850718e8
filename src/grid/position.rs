use serde::{Deserialize, Serialize};

/// An immutable 2D coordinate.
///
/// Coordinates are signed so that neighbor derivation never needs bounds
/// checking: `Position::new(0, 0).up()` is a perfectly good value, it is
/// simply outside every grid. Bounds are the [`Grid`](crate::grid::Grid)'s
/// responsibility.
///
/// Equality and hashing are by `(row, col)` value, which is what lets
/// positions serve as set and map keys for region membership and for the
/// visited sets in flood fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i64,
    pub col: i64,
}

impl Position {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    pub fn up(&self) -> Self {
        Self::new(self.row - 1, self.col)
    }

    pub fn down(&self) -> Self {
        Self::new(self.row + 1, self.col)
    }

    pub fn left(&self) -> Self {
        Self::new(self.row, self.col - 1)
    }

    pub fn right(&self) -> Self {
        Self::new(self.row, self.col + 1)
    }

    pub fn up_left(&self) -> Self {
        Self::new(self.row - 1, self.col - 1)
    }

    pub fn up_right(&self) -> Self {
        Self::new(self.row - 1, self.col + 1)
    }

    pub fn down_left(&self) -> Self {
        Self::new(self.row + 1, self.col - 1)
    }

    pub fn down_right(&self) -> Self {
        Self::new(self.row + 1, self.col + 1)
    }

    /// The neighbor one step away in `direction`.
    pub fn step(&self, direction: Direction) -> Self {
        match direction {
            Direction::Up => self.up(),
            Direction::Right => self.right(),
            Direction::Down => self.down(),
            Direction::Left => self.left(),
            Direction::UpRight => self.up_right(),
            Direction::DownRight => self.down_right(),
            Direction::DownLeft => self.down_left(),
            Direction::UpLeft => self.up_left(),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the eight compass directions on a square grid.
///
/// [`Direction::ORTHOGONAL`], [`Direction::DIAGONAL`] and [`Direction::ALL`]
/// fix the enumeration order used everywhere neighbors are listed, so
/// encoders that post constraints in neighbor order are reproducible from
/// run to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
    UpRight,
    DownRight,
    DownLeft,
    UpLeft,
}

impl Direction {
    /// N, E, S, W.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// NE, SE, SW, NW.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::UpRight,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::UpLeft,
    ];

    /// Orthogonal directions first, then diagonals.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::UpRight,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::UpLeft,
    ];

    /// The textual code used in puzzle grids ("U", "DR", ...).
    pub fn code(&self) -> &'static str {
        match self {
            Direction::Up => "U",
            Direction::Right => "R",
            Direction::Down => "D",
            Direction::Left => "L",
            Direction::UpRight => "UR",
            Direction::DownRight => "DR",
            Direction::DownLeft => "DL",
            Direction::UpLeft => "UL",
        }
    }

    /// Parses a directional code. Returns `None` for anything else.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "U" => Some(Direction::Up),
            "R" => Some(Direction::Right),
            "D" => Some(Direction::Down),
            "L" => Some(Direction::Left),
            "UR" => Some(Direction::UpRight),
            "DR" => Some(Direction::DownRight),
            "DL" => Some(Direction::DownLeft),
            "UL" => Some(Direction::UpLeft),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Direction, Position};

    #[test]
    fn neighbors_are_pure_shifts() {
        let p = Position::new(3, 5);
        assert_eq!(p.up(), Position::new(2, 5));
        assert_eq!(p.down(), Position::new(4, 5));
        assert_eq!(p.left(), Position::new(3, 4));
        assert_eq!(p.right(), Position::new(3, 6));
        assert_eq!(p.up_left(), Position::new(2, 4));
        assert_eq!(p.up_right(), Position::new(2, 6));
        assert_eq!(p.down_left(), Position::new(4, 4));
        assert_eq!(p.down_right(), Position::new(4, 6));
        // The original is untouched.
        assert_eq!(p, Position::new(3, 5));
    }

    #[test]
    fn derivation_is_not_bounds_checked() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.up_left(), Position::new(-1, -1));
    }

    #[test]
    fn step_agrees_with_named_constructors() {
        let p = Position::new(1, 1);
        for dir in Direction::ALL {
            let via_step = p.step(dir);
            let via_name = match dir {
                Direction::Up => p.up(),
                Direction::Right => p.right(),
                Direction::Down => p.down(),
                Direction::Left => p.left(),
                Direction::UpRight => p.up_right(),
                Direction::DownRight => p.down_right(),
                Direction::DownLeft => p.down_left(),
                Direction::UpLeft => p.up_left(),
            };
            assert_eq!(via_step, via_name);
        }
    }

    #[test]
    fn direction_codes_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_code(dir.code()), Some(dir));
        }
        assert_eq!(Direction::from_code("X"), None);
    }

    #[test]
    fn positions_are_usable_as_map_keys() {
        let mut visited = std::collections::HashSet::new();
        visited.insert(Position::new(1, 2));
        assert!(visited.contains(&Position::new(1, 2)));
        assert!(!visited.contains(&Position::new(2, 1)));
    }
}
