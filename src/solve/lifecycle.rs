use std::time::Instant;

use tracing::debug;

use crate::engine::ConstraintEngine;
use crate::error::Result;
use crate::grid::Grid;
use crate::solve::outcome::{Analytics, SolveOutcome};

/// The contract every puzzle encoder implements.
///
/// An encoder is constructed from a validated [`crate::puzzle::PuzzleData`]
/// — that step builds whatever [`Grid`]/[`crate::grid::RegionsGrid`]
/// instances the puzzle needs and must not touch the engine. The two hooks
/// here are the rest of the contract: one posts the puzzle's rules to the
/// engine, the other reads the engine's assignment back into a grid.
///
/// Hook errors are encoder bugs and propagate unchanged; only an
/// engine-reported status is a soft outcome.
pub trait PuzzleEncoder {
    /// Declares variables and posts the puzzle's constraints.
    fn build_constraints(&mut self, engine: &mut dyn ConstraintEngine) -> Result<()>;

    /// Materializes the solution grid from the engine's assignment. Only
    /// called when the solve status carries an assignment.
    fn extract_solution(&self, engine: &dyn ConstraintEngine) -> Result<Grid>;
}

/// Drives one encoder through the solve lifecycle:
/// build constraints → search → classify → extract.
///
/// Always produces a [`SolveOutcome`] with analytics attached, whatever the
/// status — an infeasible or invalid run is still diagnosable.
pub fn run(
    encoder: &mut dyn PuzzleEncoder,
    engine: &mut dyn ConstraintEngine,
) -> Result<SolveOutcome> {
    let build_start = Instant::now();
    encoder.build_constraints(engine)?;
    let build_time = build_start.elapsed();
    debug!(?build_time, "constraints built");

    let status = engine.solve();
    debug!(?status, "engine returned");

    let solution = if status.has_assignment() {
        Some(encoder.extract_solution(engine)?)
    } else {
        None
    };

    Ok(SolveOutcome {
        status,
        solution,
        analytics: Analytics::from_engine(engine.statistics(), build_time),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{run, PuzzleEncoder};
    use crate::engine::{ConstraintEngine, LinearExpr, RecordingEngine, SolveStatus};
    use crate::error::{PuzzleError, Result};
    use crate::grid::{Cell, Grid, Position};

    /// Two cells, each 1..=2, forced different. Small enough to assert on
    /// everything the lifecycle does.
    struct PairEncoder {
        vars: Vec<u32>,
        fail_build: bool,
    }

    impl PairEncoder {
        fn new() -> Self {
            Self {
                vars: Vec::new(),
                fail_build: false,
            }
        }
    }

    impl PuzzleEncoder for PairEncoder {
        fn build_constraints(&mut self, engine: &mut dyn ConstraintEngine) -> Result<()> {
            if self.fail_build {
                return Err(PuzzleError::Encoder("bad encoding".to_string()).into());
            }
            let a = engine.new_int_var(1, 2, "cell_0_0");
            let b = engine.new_int_var(1, 2, "cell_0_1");
            engine.post_ne(&LinearExpr::var(a), &LinearExpr::var(b));
            self.vars = vec![a, b];
            Ok(())
        }

        fn extract_solution(&self, engine: &dyn ConstraintEngine) -> Result<Grid> {
            let mut grid = Grid::filled(1, 2, Cell::Blank)?;
            for (i, var) in self.vars.iter().enumerate() {
                let value = engine.value_of(*var)? as u32;
                grid.set(Position::new(0, i as i64), Cell::Number(value))?;
            }
            Ok(grid)
        }
    }

    #[test]
    fn feasible_runs_extract_a_solution() {
        let _ = tracing_subscriber::fmt::try_init();

        let mut encoder = PairEncoder::new();
        let mut engine = RecordingEngine::scripted(SolveStatus::Feasible, vec![1, 2]);
        let outcome = run(&mut encoder, &mut engine).unwrap();

        assert!(outcome.is_solved());
        assert_eq!(outcome.status, SolveStatus::Feasible);
        let expected = Grid::from_tokens(&[vec!["1".to_string(), "2".to_string()]]).unwrap();
        assert_eq!(outcome.solution.unwrap(), expected);
        assert_eq!(outcome.analytics.variable_count, 2);
        assert_eq!(outcome.analytics.constraint_count, 1);
    }

    #[test]
    fn infeasible_runs_report_analytics_without_a_solution() {
        let mut encoder = PairEncoder::new();
        let mut engine =
            RecordingEngine::with_status(SolveStatus::Infeasible).with_search_effort(3, 17);
        let outcome = run(&mut encoder, &mut engine).unwrap();

        assert!(!outcome.is_solved());
        assert_eq!(outcome.status, SolveStatus::Infeasible);
        assert!(outcome.solution.is_none());
        // Still diagnosable.
        assert_eq!(outcome.analytics.variable_count, 2);
        assert_eq!(outcome.analytics.conflicts, 3);
        assert_eq!(outcome.analytics.branches, 17);
    }

    #[test]
    fn unknown_and_invalid_are_soft_outcomes() {
        for status in [SolveStatus::Unknown, SolveStatus::InvalidModel] {
            let mut encoder = PairEncoder::new();
            let mut engine = RecordingEngine::with_status(status);
            let outcome = run(&mut encoder, &mut engine).unwrap();
            assert_eq!(outcome.status, status);
            assert!(outcome.solution.is_none());
        }
    }

    #[test]
    fn build_hook_errors_propagate_unchanged() {
        let mut encoder = PairEncoder::new();
        encoder.fail_build = true;
        let mut engine = RecordingEngine::with_status(SolveStatus::Feasible);
        let err = run(&mut encoder, &mut engine).unwrap_err();
        assert!(matches!(err.kind(), PuzzleError::Encoder(msg) if msg == "bad encoding"));
    }
}
