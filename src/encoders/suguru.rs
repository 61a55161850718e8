use crate::engine::{ConstraintEngine, LinearExpr, VarHandle};
use crate::error::{PuzzleError, Result};
use crate::grid::{Cell, Grid, Position, RegionsGrid, Topology};
use crate::puzzle::{AllowedValues, PuzzleData};
use crate::solve::PuzzleEncoder;

/// Suguru (Tectonic): every region of size `k` contains `1..=k`, and cells
/// that touch — orthogonally or diagonally — never hold the same value.
///
/// Exercises [`RegionsGrid`] and the 8-neighbor topology: region
/// all-different scopes come from the label partition, the touch rule from
/// [`Topology::All`].
#[derive(Debug)]
pub struct SuguruSolver {
    clues: Grid,
    regions: RegionsGrid,
    num_rows: usize,
    num_cols: usize,
    vars: Vec<VarHandle>,
}

impl SuguruSolver {
    pub fn new(data: &PuzzleData) -> Result<Self> {
        data.check_dimensions()?;
        let region_tokens = data.require_region_grid()?;

        AllowedValues::tokens(["-"])
            .with_integers()
            .validate_grid(&data.grid)?;
        AllowedValues::default()
            .with_integers()
            .with_letters()
            .validate_grid(region_tokens)?;

        let clues = Grid::from_tokens(&data.grid)?;
        let regions = RegionsGrid::from_tokens(region_tokens)?;

        Ok(Self {
            clues,
            regions,
            num_rows: data.num_rows,
            num_cols: data.num_cols,
            vars: Vec::new(),
        })
    }

    /// Registry factory.
    pub fn factory(data: &PuzzleData) -> Result<Box<dyn PuzzleEncoder>> {
        Ok(Box::new(Self::new(data)?))
    }

    fn var(&self, pos: Position) -> VarHandle {
        self.vars[pos.row as usize * self.num_cols + pos.col as usize]
    }
}

impl PuzzleEncoder for SuguruSolver {
    fn build_constraints(&mut self, engine: &mut dyn ConstraintEngine) -> Result<()> {
        // Each cell ranges over 1..=size of its region.
        self.vars = Vec::with_capacity(self.num_rows * self.num_cols);
        for (pos, cell) in self.clues.iter() {
            let label = self
                .regions
                .region_of(pos)
                .ok_or_else(|| PuzzleError::Encoder(format!("no region for {pos}")))?;
            let region_size = self.regions.region(label).map(|r| r.len()).unwrap_or(0);
            let name = format!("cell_{}_{}", pos.row, pos.col);
            let var = engine.new_int_var(1, region_size as i64, &name);
            self.vars.push(var);
            if let Some(clue) = cell.as_number() {
                engine.post_eq(&LinearExpr::var(var), &LinearExpr::constant(clue as i64));
            }
        }

        // All different within each region. Row-major over labels keeps
        // posting order deterministic.
        let mut seen = std::collections::HashSet::new();
        for pos in self.clues.positions() {
            let label = self.regions.region_of(pos).cloned();
            let Some(label) = label else { continue };
            if !seen.insert(label.clone()) {
                continue;
            }
            let mut cells: Vec<Position> =
                self.regions.region(&label).unwrap().iter().copied().collect();
            cells.sort();
            let vars: Vec<VarHandle> = cells.iter().map(|p| self.var(*p)).collect();
            engine.post_all_different(&vars);
        }

        // Touching cells differ. Same-region pairs are already covered by
        // the all-different scope above.
        for pos in self.clues.positions() {
            for neighbor in self.clues.neighbors(pos, Topology::All) {
                if neighbor <= pos {
                    continue;
                }
                if self.regions.region_of(pos) == self.regions.region_of(neighbor) {
                    continue;
                }
                engine.post_ne(
                    &LinearExpr::var(self.var(pos)),
                    &LinearExpr::var(self.var(neighbor)),
                );
            }
        }
        Ok(())
    }

    fn extract_solution(&self, engine: &dyn ConstraintEngine) -> Result<Grid> {
        let mut solution = Grid::filled(self.num_rows, self.num_cols, Cell::Blank)?;
        for (i, var) in self.vars.iter().enumerate() {
            let value = engine.value_of(*var)?;
            let pos = Position::new(
                (i / self.num_cols) as i64,
                (i % self.num_cols) as i64,
            );
            solution.set(pos, Cell::Number(value as u32))?;
        }
        Ok(solution)
    }
}
