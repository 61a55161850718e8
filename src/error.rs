use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The concrete failure taxonomy for the crate.
///
/// Structural, validation and bounds errors are always fatal to the puzzle
/// instance that produced them; nothing in the core catches and repairs them.
/// Engine outcomes (infeasible, unknown, invalid model) are deliberately NOT
/// errors — they are reported as [`crate::solve::SolveStatus`] values.
#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("grid has no rows")]
    EmptyGrid,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("missing required puzzle field `{0}`")]
    MissingField(&'static str),

    #[error("`{field}` is {found_rows}x{found_cols}, expected {expected_rows}x{expected_cols}")]
    DimensionMismatch {
        field: &'static str,
        expected_rows: usize,
        expected_cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    #[error("invalid value {value:?} at ({row}, {col}); allowed: {allowed}")]
    InvalidCellValue {
        row: usize,
        col: usize,
        value: String,
        allowed: String,
    },

    #[error("position ({row}, {col}) is outside a {num_rows}x{num_cols} grid")]
    OutOfBounds {
        row: i64,
        col: i64,
        num_rows: usize,
        num_cols: usize,
    },

    #[error("no such puzzle type: {0:?}")]
    UnknownPuzzleType(String),

    #[error("engine has no value for variable ?{0}")]
    UnassignedVariable(u32),

    #[error("{0}")]
    Encoder(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<PuzzleError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<PuzzleError> for Error {
    fn from(inner: PuzzleError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}

impl Error {
    /// The wrapped [`PuzzleError`], for callers that match on the taxonomy.
    pub fn kind(&self) -> &PuzzleError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}
