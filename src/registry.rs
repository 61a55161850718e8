//! Name-based resolution from a puzzle-type key to its encoder.
//!
//! The table is built once from an explicit registration list — no
//! reflection, no source scanning — and every registration derives its key
//! from the encoder's type name: strip the `Solver` suffix, then convert
//! camel case to snake case. Names that do not decompose mechanically
//! (acronym-bearing ones like `ABCEndView`) are listed in an override
//! table that takes precedence.

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::debug;

use crate::encoders::{ABCEndViewSolver, SudokuSolver, SuguruSolver};
use crate::engine::ConstraintEngine;
use crate::error::{PuzzleError, Result};
use crate::puzzle::PuzzleData;
use crate::solve::{self, PuzzleEncoder, SolvedPuzzle};

/// Constructs an encoder from validated puzzle input.
pub type EncoderFactory = fn(&PuzzleData) -> Result<Box<dyn PuzzleEncoder>>;

/// Key overrides for type names the mechanical rule mangles.
const KEY_OVERRIDES: &[(&str, &str)] = &[("ABCEndView", "abc_end_view")];

/// Derives the canonical snake_case key for an encoder type name.
pub fn derive_key(type_name: &str) -> String {
    let stem = type_name.strip_suffix("Solver").unwrap_or(type_name);
    if let Some((_, key)) = KEY_OVERRIDES.iter().find(|(name, _)| *name == stem) {
        return (*key).to_string();
    }
    let mut key = String::new();
    for (i, c) in stem.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                key.push('_');
            }
            key.push(c.to_ascii_lowercase());
        } else {
            key.push(c);
        }
    }
    key
}

/// The puzzle-type table: canonical key to encoder factory.
#[derive(Default)]
pub struct Registry {
    table: HashMap<String, EncoderFactory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(type name, factory)` pairs.
    pub fn with_encoders(entries: &[(&str, EncoderFactory)]) -> Self {
        let mut registry = Self::new();
        for (type_name, factory) in entries {
            registry.register(type_name, *factory);
        }
        registry
    }

    /// Registers a factory under the key derived from `type_name`.
    pub fn register(&mut self, type_name: &str, factory: EncoderFactory) {
        let key = derive_key(type_name);
        debug!(%type_name, %key, "registered encoder");
        self.table.insert(key, factory);
    }

    /// Resolves a puzzle-type key. Unknown keys are an error, not a `None`.
    pub fn resolve(&self, puzzle_type: &str) -> Result<EncoderFactory> {
        self.table
            .get(puzzle_type)
            .copied()
            .ok_or_else(|| PuzzleError::UnknownPuzzleType(puzzle_type.to_string()).into())
    }

    /// Resolves and constructs an encoder for `data`.
    pub fn construct(
        &self,
        puzzle_type: &str,
        data: &PuzzleData,
    ) -> Result<Box<dyn PuzzleEncoder>> {
        let factory = self.resolve(puzzle_type)?;
        factory(data)
    }

    /// Resolves, constructs, and drives the full solve lifecycle.
    pub fn solve(
        &self,
        puzzle_type: &str,
        data: &PuzzleData,
        engine: &mut dyn ConstraintEngine,
    ) -> Result<SolvedPuzzle> {
        let mut encoder = self.construct(puzzle_type, data)?;
        let outcome = solve::run(encoder.as_mut(), engine)?;
        Ok(SolvedPuzzle {
            data: data.clone(),
            outcome,
        })
    }

    /// The registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.table.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// The table of in-tree encoders, built on first use.
    pub fn builtin() -> &'static Registry {
        lazy_static! {
            static ref BUILTIN: Registry = Registry::with_encoders(&[
                ("SudokuSolver", SudokuSolver::factory as EncoderFactory),
                ("SuguruSolver", SuguruSolver::factory as EncoderFactory),
                ("ABCEndViewSolver", ABCEndViewSolver::factory as EncoderFactory),
            ]);
        }
        &BUILTIN
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{derive_key, Registry};
    use crate::engine::{RecordingEngine, SolveStatus};
    use crate::error::PuzzleError;
    use crate::puzzle::PuzzleData;

    #[test]
    fn mechanical_key_derivation() {
        assert_eq!(derive_key("SudokuSolver"), "sudoku");
        assert_eq!(derive_key("SuguruSolver"), "suguru");
        assert_eq!(derive_key("MagneticFieldSolver"), "magnetic_field");
        // Works on bare stems too.
        assert_eq!(derive_key("MagneticField"), "magnetic_field");
    }

    #[test]
    fn override_table_beats_the_mechanical_rule() {
        // Mechanically this would come out as "a_b_c_end_view".
        assert_eq!(derive_key("ABCEndViewSolver"), "abc_end_view");
        assert_eq!(derive_key("ABCEndView"), "abc_end_view");
    }

    #[test]
    fn builtin_table_resolves_every_in_tree_encoder() {
        let registry = Registry::builtin();
        assert_eq!(registry.keys(), vec!["abc_end_view", "sudoku", "suguru"]);
        assert!(registry.resolve("abc_end_view").is_ok());
        assert!(registry.resolve("a_b_c_end_view").is_err());
    }

    #[test]
    fn unknown_keys_fail_loudly() {
        let err = Registry::builtin().resolve("nonogram").unwrap_err();
        assert!(matches!(
            err.kind(),
            PuzzleError::UnknownPuzzleType(key) if key == "nonogram"
        ));
    }

    #[test]
    fn end_to_end_solve_through_the_registry() {
        let _ = tracing_subscriber::fmt::try_init();

        let grid: Vec<Vec<String>> = vec![
            vec!["1".into(), "-".into(), "-".into(), "-".into()],
            vec!["-".into(), "-".into(), "3".into(), "-".into()],
            vec!["-".into(), "4".into(), "-".into(), "-".into()],
            vec!["-".into(), "-".into(), "-".into(), "2".into()],
        ];
        let data = PuzzleData::new(4, 4, grid);
        let solved = vec![
            1, 3, 2, 4, //
            4, 2, 3, 1, //
            2, 4, 1, 3, //
            3, 1, 4, 2,
        ];
        let mut engine = RecordingEngine::scripted(SolveStatus::Feasible, solved);
        let result = Registry::builtin().solve("sudoku", &data, &mut engine).unwrap();

        assert!(result.is_solved());
        assert_eq!(result.to_string(), "1 3 2 4\n4 2 3 1\n2 4 1 3\n3 1 4 2\n");
    }

    #[test]
    fn infeasible_runs_come_back_as_data_not_errors() {
        let data = PuzzleData::new(
            4,
            4,
            vec![vec!["-".to_string(); 4]; 4],
        );
        let mut engine = RecordingEngine::with_status(SolveStatus::Infeasible);
        let result = Registry::builtin().solve("sudoku", &data, &mut engine).unwrap();
        assert!(!result.is_solved());
        assert!(result.outcome.analytics.variable_count > 0);
    }
}
