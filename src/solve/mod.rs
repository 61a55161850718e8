//! The solver lifecycle: the encoder contract, the driver that walks one
//! encoder through build → solve → classify → extract, and the uniform
//! result/analytics types.

pub mod lifecycle;
pub mod outcome;
pub mod stats;

pub use crate::engine::SolveStatus;
pub use lifecycle::{run, PuzzleEncoder};
pub use outcome::{Analytics, SolveOutcome, SolvedPuzzle};
pub use stats::render_analytics_table;
