use std::collections::BTreeSet;

use crate::error::{PuzzleError, Result};

/// The per-puzzle value vocabulary.
///
/// Different puzzles allow different cell alphabets — digits only,
/// directional codes, polarity markers — but the validation algorithm is
/// the same everywhere: iterate the raw grid, check membership, fail on the
/// first violation with the offending cell and the allowed set. Encoders
/// build one of these and run it before any constraint is posted, so
/// malformed input never reaches the engine.
#[derive(Debug, Clone, Default)]
pub struct AllowedValues {
    tokens: BTreeSet<String>,
    any_integer: bool,
    any_letter: bool,
}

impl AllowedValues {
    /// A vocabulary of exactly the given tokens.
    pub fn tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            any_integer: false,
            any_letter: false,
        }
    }

    /// Additionally permit any non-negative integer token.
    pub fn with_integers(mut self) -> Self {
        self.any_integer = true;
        self
    }

    /// Additionally permit any single ASCII letter.
    pub fn with_letters(mut self) -> Self {
        self.any_letter = true;
        self
    }

    /// Digits `1..=n` plus the blank token. The common case for
    /// number-placement puzzles.
    pub fn digits_up_to(n: u32) -> Self {
        let mut tokens: BTreeSet<String> = (1..=n).map(|d| d.to_string()).collect();
        tokens.insert("-".to_string());
        Self {
            tokens,
            any_integer: false,
            any_letter: false,
        }
    }

    /// Letters from `'A'` up to the `count`-th letter, plus the blank token.
    pub fn letters_up_to(count: u32) -> Self {
        let mut tokens = BTreeSet::new();
        tokens.insert("-".to_string());
        for i in 0..count {
            tokens.insert(((b'A' + i as u8) as char).to_string());
        }
        Self {
            tokens,
            any_integer: false,
            any_letter: false,
        }
    }

    /// Whether `token` is in the vocabulary.
    pub fn permits(&self, token: &str) -> bool {
        if self.tokens.contains(token) {
            return true;
        }
        if self.any_integer && !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }
        if self.any_letter {
            let mut chars = token.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if c.is_ascii_alphabetic() {
                    return true;
                }
            }
        }
        false
    }

    /// Human-readable description of the allowed set, for error messages.
    pub fn describe(&self) -> String {
        let mut parts: Vec<String> = self.tokens.iter().map(|t| format!("{:?}", t)).collect();
        if self.any_integer {
            parts.push("any non-negative integer".to_string());
        }
        if self.any_letter {
            parts.push("any single letter".to_string());
        }
        parts.join(", ")
    }

    /// Validates every cell of a raw grid, failing on the first violation
    /// with its coordinates and the allowed set.
    pub fn validate_grid(&self, grid: &[Vec<String>]) -> Result<()> {
        for (row, cells) in grid.iter().enumerate() {
            for (col, token) in cells.iter().enumerate() {
                if !self.permits(token) {
                    return Err(PuzzleError::InvalidCellValue {
                        row,
                        col,
                        value: token.clone(),
                        allowed: self.describe(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}
