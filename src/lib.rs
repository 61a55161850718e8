//! Tessella is a grid-topology and solver-lifecycle framework for
//! logic-grid puzzles.
//!
//! Given a parsed puzzle description, it validates the input, builds the
//! grid/region model, lets a puzzle-specific encoder post constraints to an
//! external constraint engine, and maps the engine's assignment back onto a
//! solution grid. The engine itself — search, propagation — is out of
//! scope: anything implementing [`ConstraintEngine`] can sit behind the
//! framework.
//!
//! # Core Concepts
//!
//! - **[`Grid`]**: the uniform coordinate/neighbor/region abstraction —
//!   bounds-checked access, neighbor queries under a [`Topology`], flood
//!   fill, and partition comparison up to relabeling.
//! - **[`PuzzleEncoder`]**: the two-hook contract every puzzle implements:
//!   post constraints, extract the solution.
//! - **[`Registry`]**: resolves a snake_case puzzle-type key to the right
//!   encoder without a hand-maintained switch.
//!
//! # Example: solving a puzzle by type key
//!
//! ```
//! use tessella::engine::{RecordingEngine, SolveStatus};
//! use tessella::puzzle::PuzzleData;
//! use tessella::registry::Registry;
//!
//! // A 4x4 sudoku dict, as an external parser would produce it.
//! let grid: Vec<Vec<String>> = vec![
//!     vec!["1".into(), "-".into(), "-".into(), "-".into()],
//!     vec!["-".into(), "-".into(), "3".into(), "-".into()],
//!     vec!["-".into(), "4".into(), "-".into(), "-".into()],
//!     vec!["-".into(), "-".into(), "-".into(), "2".into()],
//! ];
//! let data = PuzzleData::new(4, 4, grid);
//!
//! // A real deployment plugs in a full constraint engine here; the
//! // recording engine replays a scripted assignment instead.
//! let assignment = vec![
//!     1, 3, 2, 4,
//!     4, 2, 3, 1,
//!     2, 4, 1, 3,
//!     3, 1, 4, 2,
//! ];
//! let mut engine = RecordingEngine::scripted(SolveStatus::Feasible, assignment);
//!
//! let result = Registry::builtin().solve("sudoku", &data, &mut engine).unwrap();
//! assert!(result.is_solved());
//! assert_eq!(result.outcome.analytics.variable_count, 16);
//! ```
//!
//! [`ConstraintEngine`]: crate::engine::ConstraintEngine
//! [`Grid`]: crate::grid::Grid
//! [`Topology`]: crate::grid::Topology
//! [`PuzzleEncoder`]: crate::solve::PuzzleEncoder
//! [`Registry`]: crate::registry::Registry

pub mod encoders;
pub mod engine;
pub mod error;
pub mod grid;
pub mod puzzle;
pub mod registry;
pub mod solve;
