use std::time::Duration;

use serde::Serialize;

use crate::engine::{EngineStatistics, SolveStatus};
use crate::grid::Grid;
use crate::puzzle::PuzzleData;

/// Everything a solve run is diagnosable by, regardless of how it went.
///
/// `build_time` is measured by the lifecycle around the constraint-building
/// hook; the rest comes from the engine's own statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analytics {
    pub variable_count: u64,
    pub bool_variable_count: u64,
    pub constraint_count: u64,
    pub conflicts: u64,
    pub branches: u64,
    pub build_time: Duration,
    pub cpu_time: Duration,
    pub wall_time: Duration,
}

impl Analytics {
    pub fn from_engine(stats: EngineStatistics, build_time: Duration) -> Self {
        Self {
            variable_count: stats.variable_count,
            bool_variable_count: stats.bool_variable_count,
            constraint_count: stats.constraint_count,
            conflicts: stats.conflicts,
            branches: stats.branches,
            build_time,
            cpu_time: stats.cpu_time,
            wall_time: stats.wall_time,
        }
    }
}

/// The uniform result contract of a solve run.
///
/// The solution grid is present exactly when the status carries an
/// assignment; infeasible, invalid and unknown runs still carry full
/// analytics so they can be diagnosed.
#[derive(Debug, Clone, Serialize)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub solution: Option<Grid>,
    pub analytics: Analytics,
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        self.status.has_assignment() && self.solution.is_some()
    }
}

/// A solved (or unsolved) puzzle: the input it came from plus the outcome.
#[derive(Debug, Clone, Serialize)]
pub struct SolvedPuzzle {
    pub data: PuzzleData,
    pub outcome: SolveOutcome,
}

impl SolvedPuzzle {
    pub fn is_solved(&self) -> bool {
        self.outcome.is_solved()
    }
}

impl std::fmt::Display for SolvedPuzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome.solution {
            Some(grid) => write!(f, "{}", grid),
            None => writeln!(f, "unsolved ({:?})", self.outcome.status),
        }
    }
}
