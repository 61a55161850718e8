//! The generic grid/topology data model.
//!
//! [`Grid`] is the uniform coordinate/neighbor/region abstraction every
//! puzzle encoder is built on: bounds-checked access, neighbor enumeration
//! under a selectable topology, flood-fill connected search, and the two
//! grid-equality notions (structural, and bijective up to relabeling).

pub mod cell;
pub mod position;
pub mod regions;

pub use cell::Cell;
pub use position::{Direction, Position};
pub use regions::RegionsGrid;

use im::HashSet;
use serde::Serialize;
use std::collections::VecDeque;

use crate::error::{PuzzleError, Result};

/// Selects which neighbor set an operation considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Topology {
    /// The four orthogonal neighbors (N/E/S/W). The default almost
    /// everywhere.
    Orthogonal,
    /// All eight surrounding cells.
    All,
    /// The four diagonal neighbors only.
    Diagonal,
}

impl Topology {
    /// The fixed direction order for this topology. Encoders that post
    /// constraints in neighbor order rely on this being stable.
    pub fn directions(&self) -> &'static [Direction] {
        match self {
            Topology::Orthogonal => &Direction::ORTHOGONAL,
            Topology::All => &Direction::ALL,
            Topology::Diagonal => &Direction::DIAGONAL,
        }
    }
}

/// A rectangular matrix of [`Cell`] tokens.
///
/// Constructed once from parsed puzzle input and treated as immutable by
/// consuming code. Code that wants a mutable working copy (a solver
/// materializing its solution, say) clones the grid first; shared mutation
/// is never part of the model. The only mutator, [`Grid::set`], exists for
/// exactly those working copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    num_rows: usize,
    num_cols: usize,
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Builds a grid from rows of cells.
    ///
    /// Fails with [`PuzzleError::EmptyGrid`] for a zero-row or zero-column
    /// input and [`PuzzleError::RaggedRows`] as soon as a row's length
    /// disagrees with the first row's.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let num_rows = rows.len();
        if num_rows == 0 || rows[0].is_empty() {
            return Err(PuzzleError::EmptyGrid.into());
        }
        let num_cols = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != num_cols {
                return Err(PuzzleError::RaggedRows {
                    row: i,
                    expected: num_cols,
                    found: row.len(),
                }
                .into());
            }
        }
        Ok(Self {
            num_rows,
            num_cols,
            rows,
        })
    }

    /// Builds a grid by parsing raw string tokens, as handed over by the
    /// external per-puzzle parsers.
    pub fn from_tokens(tokens: &[Vec<String>]) -> Result<Self> {
        let rows = tokens
            .iter()
            .map(|row| row.iter().map(|t| Cell::parse(t)).collect())
            .collect();
        Self::from_rows(rows)
    }

    /// A grid with every cell set to `fill`. Used as the starting point for
    /// solution extraction.
    pub fn filled(num_rows: usize, num_cols: usize, fill: Cell) -> Result<Self> {
        Self::from_rows(vec![vec![fill; num_cols]; num_rows])
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Whether `pos` lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.num_rows
            && (pos.col as usize) < self.num_cols
    }

    /// Bounds-checked cell lookup.
    ///
    /// An out-of-range position is an encoder bug, so this fails with
    /// [`PuzzleError::OutOfBounds`] rather than returning a sentinel.
    pub fn value(&self, pos: Position) -> Result<&Cell> {
        if !self.contains(pos) {
            return Err(PuzzleError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                num_rows: self.num_rows,
                num_cols: self.num_cols,
            }
            .into());
        }
        Ok(&self.rows[pos.row as usize][pos.col as usize])
    }

    /// Bounds-checked lookup by raw row/column indices.
    pub fn value_at(&self, row: usize, col: usize) -> Result<&Cell> {
        self.value(Position::new(row as i64, col as i64))
    }

    /// Replaces the cell at `pos`. Only meaningful on a working copy; see
    /// the type-level docs.
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<()> {
        if !self.contains(pos) {
            return Err(PuzzleError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                num_rows: self.num_rows,
                num_cols: self.num_cols,
            }
            .into());
        }
        self.rows[pos.row as usize][pos.col as usize] = cell;
        Ok(())
    }

    /// The in-bounds neighbors of `pos` under `topology`, in the topology's
    /// fixed direction order.
    pub fn neighbors(&self, pos: Position, topology: Topology) -> Vec<Position> {
        topology
            .directions()
            .iter()
            .map(|dir| pos.step(*dir))
            .filter(|p| self.contains(*p))
            .collect()
    }

    /// Flood-fill connected search.
    ///
    /// Returns every position reachable from `start` via orthogonal steps
    /// where `predicate(current_value, candidate_value)` holds at each step.
    /// The result always contains `start` and is independent of traversal
    /// order. Fails if `start` is out of bounds.
    pub fn search<F>(&self, start: Position, predicate: F) -> Result<HashSet<Position>>
    where
        F: Fn(&Cell, &Cell) -> bool,
    {
        // Also the bounds check for `start`.
        self.value(start)?;

        let mut reached = HashSet::new();
        let mut queue = VecDeque::new();
        reached.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let current_value = &self.rows[current.row as usize][current.col as usize];
            for neighbor in self.neighbors(current, Topology::Orthogonal) {
                if reached.contains(&neighbor) {
                    continue;
                }
                let candidate_value = &self.rows[neighbor.row as usize][neighbor.col as usize];
                if predicate(current_value, candidate_value) {
                    reached.insert(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }
        Ok(reached)
    }

    /// The connected component of equal-valued cells containing `start`.
    ///
    /// This is geometric connectivity, in contrast to
    /// [`RegionsGrid`](crate::grid::RegionsGrid), which groups by label
    /// alone.
    pub fn region_of(&self, start: Position) -> Result<HashSet<Position>> {
        let start_value = self.value(start)?.clone();
        self.search(start, move |_, candidate| *candidate == start_value)
    }

    /// Partition equality up to relabeling.
    ///
    /// Treats each grid's non-blank values as partition labels and checks
    /// whether a one-to-one relabeling maps this grid's partition onto
    /// `other`'s. Blank cells must be blank in both. Used to verify puzzles
    /// whose solution is unique only up to renaming of region ids. A
    /// dimension mismatch yields `false`, not an error.
    pub fn is_bijective(&self, other: &Grid) -> bool {
        if self.num_rows != other.num_rows || self.num_cols != other.num_cols {
            return false;
        }
        let mut forward: std::collections::HashMap<&Cell, &Cell> = std::collections::HashMap::new();
        let mut backward: std::collections::HashMap<&Cell, &Cell> =
            std::collections::HashMap::new();
        for (pos, a) in self.iter() {
            let b = &other.rows[pos.row as usize][pos.col as usize];
            match (a.is_blank(), b.is_blank()) {
                (true, true) => continue,
                (true, false) | (false, true) => return false,
                (false, false) => {}
            }
            if *forward.entry(a).or_insert(b) != b {
                return false;
            }
            if *backward.entry(b).or_insert(a) != a {
                return false;
            }
        }
        true
    }

    /// Iterates `(position, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, cell)| (Position::new(r as i64, c as i64), cell))
        })
    }

    /// All in-bounds positions, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter().map(|(pos, _)| pos)
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            let tokens: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            writeln!(f, "{}", tokens.join(" "))?;
        }
        Ok(())
    }
}
