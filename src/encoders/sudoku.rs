use crate::engine::{ConstraintEngine, LinearExpr, VarHandle};
use crate::error::{PuzzleError, Result};
use crate::grid::{Cell, Grid, Position};
use crate::puzzle::{AllowedValues, PuzzleData};
use crate::solve::PuzzleEncoder;

/// Classic sudoku: digits `1..=n` on an `n x n` grid, all different per
/// row, column and box.
///
/// Box dimensions come from the `box_rows`/`box_cols` params, or are
/// inferred when `n` is a perfect square.
#[derive(Debug)]
pub struct SudokuSolver {
    clues: Grid,
    size: usize,
    box_rows: usize,
    box_cols: usize,
    vars: Vec<VarHandle>,
}

impl SudokuSolver {
    pub fn new(data: &PuzzleData) -> Result<Self> {
        data.check_dimensions()?;
        if data.num_rows != data.num_cols {
            return Err(PuzzleError::Encoder(format!(
                "sudoku grid must be square, got {}x{}",
                data.num_rows, data.num_cols
            ))
            .into());
        }
        let size = data.num_rows;

        let box_rows = match data.params.get("box_rows") {
            Some(&r) => r as usize,
            None => integer_sqrt(size).ok_or_else(|| {
                PuzzleError::Encoder(format!(
                    "{size}x{size} is not a perfect square; pass box_rows"
                ))
            })?,
        };
        if box_rows == 0 || size % box_rows != 0 {
            return Err(PuzzleError::Encoder(format!(
                "box_rows {box_rows} does not divide grid size {size}"
            ))
            .into());
        }
        let box_cols = size / box_rows;

        AllowedValues::digits_up_to(size as u32).validate_grid(&data.grid)?;
        let clues = Grid::from_tokens(&data.grid)?;

        Ok(Self {
            clues,
            size,
            box_rows,
            box_cols,
            vars: Vec::new(),
        })
    }

    /// Registry factory.
    pub fn factory(data: &PuzzleData) -> Result<Box<dyn PuzzleEncoder>> {
        Ok(Box::new(Self::new(data)?))
    }

    fn var(&self, row: usize, col: usize) -> VarHandle {
        self.vars[row * self.size + col]
    }
}

impl PuzzleEncoder for SudokuSolver {
    fn build_constraints(&mut self, engine: &mut dyn ConstraintEngine) -> Result<()> {
        let n = self.size;
        self.vars = Vec::with_capacity(n * n);
        for (pos, cell) in self.clues.iter() {
            let name = format!("cell_{}_{}", pos.row, pos.col);
            let var = engine.new_int_var(1, n as i64, &name);
            self.vars.push(var);
            if let Some(clue) = cell.as_number() {
                engine.post_eq(&LinearExpr::var(var), &LinearExpr::constant(clue as i64));
            }
        }

        for row in 0..n {
            let vars: Vec<VarHandle> = (0..n).map(|col| self.var(row, col)).collect();
            engine.post_all_different(&vars);
        }
        for col in 0..n {
            let vars: Vec<VarHandle> = (0..n).map(|row| self.var(row, col)).collect();
            engine.post_all_different(&vars);
        }
        for box_row in (0..n).step_by(self.box_rows) {
            for box_col in (0..n).step_by(self.box_cols) {
                let mut vars = Vec::with_capacity(n);
                for r in box_row..box_row + self.box_rows {
                    for c in box_col..box_col + self.box_cols {
                        vars.push(self.var(r, c));
                    }
                }
                engine.post_all_different(&vars);
            }
        }
        Ok(())
    }

    fn extract_solution(&self, engine: &dyn ConstraintEngine) -> Result<Grid> {
        let mut solution = Grid::filled(self.size, self.size, Cell::Blank)?;
        for (i, var) in self.vars.iter().enumerate() {
            let value = engine.value_of(*var)?;
            let pos = Position::new((i / self.size) as i64, (i % self.size) as i64);
            solution.set(pos, Cell::Number(value as u32))?;
        }
        Ok(solution)
    }
}

fn integer_sqrt(n: usize) -> Option<usize> {
    let root = (n as f64).sqrt().round() as usize;
    (root * root == n).then_some(root)
}
