//! In-tree puzzle encoders.
//!
//! The real system carries dozens of these; the three here are the ones
//! that exercise every part of the framework contract — plain row/column
//! scopes (sudoku), the region partition and 8-neighbor topology (suguru),
//! and reified literals with edge-clue vectors (ABC end view). New
//! encoders follow the same shape: validate in the constructor, post in
//! `build_constraints`, read back in `extract_solution`, and register a
//! factory in [`crate::registry`].

pub mod abc_end_view;
pub mod sudoku;
pub mod suguru;

pub use abc_end_view::ABCEndViewSolver;
pub use sudoku::SudokuSolver;
pub use suguru::SuguruSolver;
