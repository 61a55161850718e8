//! The seam between the core and the external constraint-solving engine.
//!
//! The core never implements search or propagation; it declares variables
//! and posts constraints through [`ConstraintEngine`] and interprets the
//! status the engine hands back. Any conforming backend can sit behind the
//! trait — [`recording::RecordingEngine`] is the in-tree one, used by tests
//! and dry runs.

pub mod recording;

pub use recording::RecordingEngine;

use std::time::Duration;

use serde::Serialize;

use crate::error::Result;

/// An opaque handle to an engine variable.
pub type VarHandle = u32;

/// The engine's classification of a solved model.
///
/// These are reported outcomes, never errors: the caller decides what an
/// infeasible or unknown result means for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    InvalidModel,
    Unknown,
}

impl SolveStatus {
    /// Whether the engine produced an assignment worth extracting.
    pub fn has_assignment(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// Comparison operator for linear constraint posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Comparator {
    Eq,
    Ne,
    Le,
    Lt,
    Ge,
    Gt,
}

/// A linear expression over engine variables: `sum(coeff * var) + constant`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearExpr {
    pub terms: Vec<(i64, VarHandle)>,
    pub constant: i64,
}

impl LinearExpr {
    /// The expression `1 * var`.
    pub fn var(var: VarHandle) -> Self {
        Self {
            terms: vec![(1, var)],
            constant: 0,
        }
    }

    /// A constant expression with no variables.
    pub fn constant(value: i64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// The unit-coefficient sum of `vars`.
    pub fn sum(vars: &[VarHandle]) -> Self {
        Self {
            terms: vars.iter().map(|v| (1, *v)).collect(),
            constant: 0,
        }
    }

    /// Appends `coeff * var`.
    pub fn term(mut self, coeff: i64, var: VarHandle) -> Self {
        self.terms.push((coeff, var));
        self
    }

    /// Adds a constant offset.
    pub fn plus(mut self, value: i64) -> Self {
        self.constant += value;
        self
    }
}

impl From<VarHandle> for LinearExpr {
    fn from(var: VarHandle) -> Self {
        LinearExpr::var(var)
    }
}

/// Search statistics the engine reports after a solve.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngineStatistics {
    pub variable_count: u64,
    pub bool_variable_count: u64,
    pub constraint_count: u64,
    pub conflicts: u64,
    pub branches: u64,
    pub cpu_time: Duration,
    pub wall_time: Duration,
}

/// The abstract constraint-solving engine.
///
/// Declaration and posting happen before [`ConstraintEngine::solve`];
/// [`ConstraintEngine::value_of`] is only meaningful once `solve` returned
/// a status with an assignment. Each encoder instance owns its own engine
/// value, so no model state is ever shared across puzzle instances.
pub trait ConstraintEngine {
    /// Declares an integer variable with inclusive bounds.
    fn new_int_var(&mut self, lower: i64, upper: i64, name: &str) -> VarHandle;

    /// Declares a 0/1 boolean variable.
    fn new_bool_var(&mut self, name: &str) -> VarHandle;

    /// Posts that all of `vars` take pairwise different values.
    fn post_all_different(&mut self, vars: &[VarHandle]);

    /// Posts `expr <cmp> rhs`.
    fn post_linear(&mut self, expr: &LinearExpr, cmp: Comparator, rhs: i64);

    /// Posts `a == b`.
    fn post_eq(&mut self, a: &LinearExpr, b: &LinearExpr);

    /// Posts `a != b`.
    fn post_ne(&mut self, a: &LinearExpr, b: &LinearExpr);

    /// Posts `literal <=> (var == value)`.
    fn post_reified_eq(&mut self, var: VarHandle, value: i64, literal: VarHandle);

    /// Runs the search. A single opaque blocking call; cancellation by
    /// timeout is the engine's business, not the core's.
    fn solve(&mut self) -> SolveStatus;

    /// The solved value of `var`. Fails if the handle is unknown or no
    /// assignment has been loaded.
    fn value_of(&self, var: VarHandle) -> Result<i64>;

    /// Search statistics for the last solve.
    fn statistics(&self) -> EngineStatistics;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{LinearExpr, SolveStatus};

    #[test]
    fn expression_builders_compose() {
        let expr = LinearExpr::sum(&[0, 1]).term(-2, 4).plus(7);
        assert_eq!(expr.terms, vec![(1, 0), (1, 1), (-2, 4)]);
        assert_eq!(expr.constant, 7);

        assert_eq!(LinearExpr::var(3), LinearExpr::from(3));
        assert_eq!(LinearExpr::constant(5).terms.len(), 0);
    }

    #[test]
    fn only_optimal_and_feasible_carry_assignments() {
        assert!(SolveStatus::Optimal.has_assignment());
        assert!(SolveStatus::Feasible.has_assignment());
        assert!(!SolveStatus::Infeasible.has_assignment());
        assert!(!SolveStatus::InvalidModel.has_assignment());
        assert!(!SolveStatus::Unknown.has_assignment());
    }
}
