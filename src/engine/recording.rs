use std::time::{Duration, Instant};

use crate::engine::{
    Comparator, ConstraintEngine, EngineStatistics, LinearExpr, SolveStatus, VarHandle,
};
use crate::error::{PuzzleError, Result};

/// Every constraint post an encoder made, in posting order.
#[derive(Debug, Clone, PartialEq)]
pub enum Post {
    AllDifferent(Vec<VarHandle>),
    Linear(LinearExpr, Comparator, i64),
    Eq(LinearExpr, LinearExpr),
    Ne(LinearExpr, LinearExpr),
    ReifiedEq(VarHandle, i64, VarHandle),
}

/// A declared variable: name and inclusive domain bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub lower: i64,
    pub upper: i64,
    pub is_bool: bool,
}

/// A [`ConstraintEngine`] that records the model instead of solving it.
///
/// The engine replays a scripted status and scripted per-variable values,
/// which is exactly what encoder tests need: they can assert on the model
/// an encoder built and drive extraction without any search being
/// implemented in this crate. Real counts flow into
/// [`ConstraintEngine::statistics`]; conflicts and branches come from the
/// script.
#[derive(Debug, Clone)]
pub struct RecordingEngine {
    pub variables: Vec<VarDecl>,
    pub posts: Vec<Post>,
    scripted_status: SolveStatus,
    scripted_values: Vec<i64>,
    scripted_conflicts: u64,
    scripted_branches: u64,
    solved: bool,
    wall_time: Duration,
}

impl RecordingEngine {
    /// An engine that will report `status` and no values.
    pub fn with_status(status: SolveStatus) -> Self {
        Self::scripted(status, Vec::new())
    }

    /// An engine that will report `status` and assign `values[handle]` to
    /// each declared variable, in declaration order.
    pub fn scripted(status: SolveStatus, values: Vec<i64>) -> Self {
        Self {
            variables: Vec::new(),
            posts: Vec::new(),
            scripted_status: status,
            scripted_values: values,
            scripted_conflicts: 0,
            scripted_branches: 0,
            solved: false,
            wall_time: Duration::ZERO,
        }
    }

    /// Sets the conflict/branch counts the statistics will report.
    pub fn with_search_effort(mut self, conflicts: u64, branches: u64) -> Self {
        self.scripted_conflicts = conflicts;
        self.scripted_branches = branches;
        self
    }

    /// The recorded all-different posts, for assertions.
    pub fn all_different_posts(&self) -> Vec<&Vec<VarHandle>> {
        self.posts
            .iter()
            .filter_map(|p| match p {
                Post::AllDifferent(vars) => Some(vars),
                _ => None,
            })
            .collect()
    }

    fn declare(&mut self, decl: VarDecl) -> VarHandle {
        let handle = self.variables.len() as VarHandle;
        self.variables.push(decl);
        handle
    }
}

impl ConstraintEngine for RecordingEngine {
    fn new_int_var(&mut self, lower: i64, upper: i64, name: &str) -> VarHandle {
        self.declare(VarDecl {
            name: name.to_string(),
            lower,
            upper,
            is_bool: false,
        })
    }

    fn new_bool_var(&mut self, name: &str) -> VarHandle {
        self.declare(VarDecl {
            name: name.to_string(),
            lower: 0,
            upper: 1,
            is_bool: true,
        })
    }

    fn post_all_different(&mut self, vars: &[VarHandle]) {
        self.posts.push(Post::AllDifferent(vars.to_vec()));
    }

    fn post_linear(&mut self, expr: &LinearExpr, cmp: Comparator, rhs: i64) {
        self.posts.push(Post::Linear(expr.clone(), cmp, rhs));
    }

    fn post_eq(&mut self, a: &LinearExpr, b: &LinearExpr) {
        self.posts.push(Post::Eq(a.clone(), b.clone()));
    }

    fn post_ne(&mut self, a: &LinearExpr, b: &LinearExpr) {
        self.posts.push(Post::Ne(a.clone(), b.clone()));
    }

    fn post_reified_eq(&mut self, var: VarHandle, value: i64, literal: VarHandle) {
        self.posts.push(Post::ReifiedEq(var, value, literal));
    }

    fn solve(&mut self) -> SolveStatus {
        let start = Instant::now();
        self.solved = self.scripted_status.has_assignment();
        self.wall_time = start.elapsed();
        self.scripted_status
    }

    fn value_of(&self, var: VarHandle) -> Result<i64> {
        if !self.solved {
            return Err(PuzzleError::UnassignedVariable(var).into());
        }
        self.scripted_values
            .get(var as usize)
            .copied()
            .ok_or_else(|| PuzzleError::UnassignedVariable(var).into())
    }

    fn statistics(&self) -> EngineStatistics {
        let bool_variable_count = self.variables.iter().filter(|v| v.is_bool).count() as u64;
        EngineStatistics {
            variable_count: self.variables.len() as u64,
            bool_variable_count,
            constraint_count: self.posts.len() as u64,
            conflicts: self.scripted_conflicts,
            branches: self.scripted_branches,
            cpu_time: self.wall_time,
            wall_time: self.wall_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Post, RecordingEngine};
    use crate::engine::{Comparator, ConstraintEngine, LinearExpr, SolveStatus};

    #[test]
    fn records_declarations_and_posts() {
        let mut engine = RecordingEngine::with_status(SolveStatus::Feasible);
        let a = engine.new_int_var(1, 9, "a");
        let b = engine.new_int_var(1, 9, "b");
        let lit = engine.new_bool_var("a_is_3");

        engine.post_all_different(&[a, b]);
        engine.post_linear(&LinearExpr::sum(&[a, b]), Comparator::Le, 10);
        engine.post_reified_eq(a, 3, lit);

        assert_eq!(engine.variables.len(), 3);
        assert!(engine.variables[2].is_bool);
        assert_eq!(engine.posts.len(), 3);
        assert_eq!(engine.all_different_posts(), vec![&vec![a, b]]);
        assert!(matches!(engine.posts[2], Post::ReifiedEq(0, 3, 2)));
    }

    #[test]
    fn statistics_reflect_the_recorded_model() {
        let mut engine =
            RecordingEngine::with_status(SolveStatus::Infeasible).with_search_effort(12, 34);
        let a = engine.new_int_var(0, 1, "a");
        let lit = engine.new_bool_var("lit");
        engine.post_reified_eq(a, 1, lit);
        assert_eq!(engine.solve(), SolveStatus::Infeasible);

        let stats = engine.statistics();
        assert_eq!(stats.variable_count, 2);
        assert_eq!(stats.bool_variable_count, 1);
        assert_eq!(stats.constraint_count, 1);
        assert_eq!(stats.conflicts, 12);
        assert_eq!(stats.branches, 34);
    }

    #[test]
    fn values_are_only_available_after_a_feasible_solve() {
        let mut engine = RecordingEngine::scripted(SolveStatus::Feasible, vec![4, 7]);
        let a = engine.new_int_var(1, 9, "a");
        let b = engine.new_int_var(1, 9, "b");

        // Before solve: nothing to read.
        assert!(engine.value_of(a).is_err());

        engine.solve();
        assert_eq!(engine.value_of(a).unwrap(), 4);
        assert_eq!(engine.value_of(b).unwrap(), 7);
        // Unknown handle.
        assert!(engine.value_of(9).is_err());
    }

    #[test]
    fn infeasible_solves_never_expose_values() {
        let mut engine = RecordingEngine::scripted(SolveStatus::Infeasible, vec![1]);
        let a = engine.new_int_var(0, 9, "a");
        engine.solve();
        assert!(engine.value_of(a).is_err());
    }
}
