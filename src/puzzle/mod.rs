//! The puzzle-input surface: the validated dict every encoder receives,
//! the per-puzzle value vocabularies, and the contract for the external
//! textual parsers.

pub mod data;
pub mod validate;

pub use data::PuzzleData;
pub use validate::AllowedValues;

/// The contract for external per-puzzle textual parsers.
///
/// Parsers return `None` — an explicit failure sentinel, not an error — on
/// malformed text, so a batch caller can report "file N malformed" and move
/// on without unwinding. Structural and value errors in an otherwise
/// parseable dict are the encoders' job, not the parsers'.
pub trait Parser {
    /// The registry key of the puzzle type this parser feeds.
    fn puzzle_type(&self) -> &str;

    fn parse(&self, text: &str) -> Option<PuzzleData>;
}
