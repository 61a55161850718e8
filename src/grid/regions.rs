use im::{HashMap, HashSet};

use crate::error::Result;
use crate::grid::{Cell, Grid, Position};

/// A [`Grid`] whose cells are partitioned into labeled regions.
///
/// Region membership is by *label equality*, not by geometric adjacency: two
/// cells carrying the same label belong to the same region even if they are
/// nowhere near each other. Region-labeling puzzles pre-assign a unique
/// label per contiguous area, so label-equality and connectivity coincide in
/// practice — but connectivity is a puzzle-level invariant, checked with
/// [`Grid::search`] where a puzzle needs it, never assumed here.
///
/// Both derived maps are built once at construction and never mutated.
#[derive(Debug, Clone)]
pub struct RegionsGrid {
    grid: Grid,
    regions: HashMap<Cell, HashSet<Position>>,
    pos_to_region: HashMap<Position, Cell>,
}

impl RegionsGrid {
    /// Builds the region maps in a single pass over the grid.
    pub fn new(grid: Grid) -> Self {
        let mut regions: HashMap<Cell, HashSet<Position>> = HashMap::new();
        let mut pos_to_region: HashMap<Position, Cell> = HashMap::new();
        for (pos, cell) in grid.iter() {
            regions.entry(cell.clone()).or_default().insert(pos);
            pos_to_region.insert(pos, cell.clone());
        }
        Self {
            grid,
            regions,
            pos_to_region,
        }
    }

    /// Parses raw region tokens and builds the partition.
    pub fn from_tokens(tokens: &[Vec<String>]) -> Result<Self> {
        Ok(Self::new(Grid::from_tokens(tokens)?))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// All regions: label to cell set.
    pub fn regions(&self) -> &HashMap<Cell, HashSet<Position>> {
        &self.regions
    }

    /// The cells carrying `label`, if any cell does.
    pub fn region(&self, label: &Cell) -> Option<&HashSet<Position>> {
        self.regions.get(label)
    }

    /// The label of the region containing `pos`, if `pos` is in bounds.
    pub fn region_of(&self, pos: Position) -> Option<&Cell> {
        self.pos_to_region.get(&pos)
    }

    /// The distinct region labels.
    pub fn labels(&self) -> impl Iterator<Item = &Cell> {
        self.regions.keys()
    }
}
