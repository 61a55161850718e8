use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{PuzzleError, Result};

/// The validated-input surface every encoder receives.
///
/// External per-puzzle parsers produce this from raw puzzle text, typically
/// by way of a JSON dict; the serde derives make that handoff direct. The
/// primary `grid` holds the clues; puzzles that need them add a
/// `region_grid`, per-row/per-column clue vectors, or named numeric
/// parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleData {
    pub num_rows: usize,
    pub num_cols: usize,
    pub grid: Vec<Vec<String>>,
    #[serde(default)]
    pub region_grid: Option<Vec<Vec<String>>>,
    /// Per-row clue vector (e.g. left/right edge clues), one entry per row.
    #[serde(default)]
    pub rows: Option<Vec<Vec<String>>>,
    /// Per-column clue vector, one entry per column.
    #[serde(default)]
    pub cols: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pub params: HashMap<String, i64>,
}

impl PuzzleData {
    /// A minimal instance: dimensions and the primary grid.
    pub fn new(num_rows: usize, num_cols: usize, grid: Vec<Vec<String>>) -> Self {
        Self {
            num_rows,
            num_cols,
            grid,
            region_grid: None,
            rows: None,
            cols: None,
            params: HashMap::new(),
        }
    }

    /// Cross-checks the declared dimensions against every grid and clue
    /// vector that is present.
    ///
    /// Runs before any engine interaction; a mismatch is fatal to the
    /// instance, never repaired.
    pub fn check_dimensions(&self) -> Result<()> {
        check_shape("grid", &self.grid, self.num_rows, self.num_cols)?;
        if let Some(region_grid) = &self.region_grid {
            check_shape("region_grid", region_grid, self.num_rows, self.num_cols)?;
        }
        if let Some(rows) = &self.rows {
            if rows.len() != self.num_rows {
                return Err(PuzzleError::DimensionMismatch {
                    field: "rows",
                    expected_rows: self.num_rows,
                    expected_cols: 0,
                    found_rows: rows.len(),
                    found_cols: 0,
                }
                .into());
            }
        }
        if let Some(cols) = &self.cols {
            if cols.len() != self.num_cols {
                return Err(PuzzleError::DimensionMismatch {
                    field: "cols",
                    expected_rows: self.num_cols,
                    expected_cols: 0,
                    found_rows: cols.len(),
                    found_cols: 0,
                }
                .into());
            }
        }
        Ok(())
    }

    /// The `region_grid`, or a [`PuzzleError::MissingField`] for puzzles
    /// that cannot do without one.
    pub fn require_region_grid(&self) -> Result<&Vec<Vec<String>>> {
        self.region_grid
            .as_ref()
            .ok_or_else(|| PuzzleError::MissingField("region_grid").into())
    }

    /// A named numeric parameter, or a [`PuzzleError::MissingField`].
    pub fn require_param(&self, name: &'static str) -> Result<i64> {
        self.params
            .get(name)
            .copied()
            .ok_or_else(|| PuzzleError::MissingField(name).into())
    }
}

fn check_shape(
    field: &'static str,
    grid: &[Vec<String>],
    num_rows: usize,
    num_cols: usize,
) -> Result<()> {
    let found_rows = grid.len();
    let found_cols = grid.first().map(|r| r.len()).unwrap_or(0);
    if found_rows != num_rows || grid.iter().any(|row| row.len() != num_cols) {
        return Err(PuzzleError::DimensionMismatch {
            field,
            expected_rows: num_rows,
            expected_cols: num_cols,
            found_rows,
            found_cols,
        }
        .into());
    }
    Ok(())
}
