use serde::{Deserialize, Serialize};

use crate::grid::position::Direction;

/// A single grid cell token.
///
/// Every puzzle in the corpus treats cells as short string-like tokens from
/// a small bounded alphabet — a digit, a dash, a directional code, a letter,
/// or some puzzle-specific marker. `Cell` is the tagged form of that
/// vocabulary, shared by every encoder instead of an open-ended generic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cell {
    /// An empty / unclued cell, written `-`.
    Blank,
    /// A non-negative integer clue.
    Number(u32),
    /// A single letter, as used by letter-placement puzzles.
    Letter(char),
    /// A directional code (`U`, `DR`, ...), as used by arrow puzzles.
    Arrow(Direction),
    /// Any other token a puzzle defines for itself.
    Marker(String),
}

impl Cell {
    /// Parses one raw token from a puzzle dict.
    ///
    /// `-` and the empty string are blanks; decimal strings are numbers;
    /// directional codes become arrows; a single ASCII letter is a letter.
    /// Anything else is kept verbatim as a marker — validation of which
    /// tokens a given puzzle actually allows happens separately, in
    /// [`crate::puzzle::AllowedValues`].
    pub fn parse(token: &str) -> Cell {
        if token.is_empty() || token == "-" {
            return Cell::Blank;
        }
        if let Ok(n) = token.parse::<u32>() {
            return Cell::Number(n);
        }
        if let Some(dir) = Direction::from_code(token) {
            return Cell::Arrow(dir);
        }
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphabetic() {
                return Cell::Letter(c);
            }
        }
        Cell::Marker(token.to_string())
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Blank)
    }

    /// The numeric payload, if this cell is a number.
    pub fn as_number(&self) -> Option<u32> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_letter(&self) -> Option<char> {
        match self {
            Cell::Letter(c) => Some(*c),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Blank => write!(f, "-"),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Letter(c) => write!(f, "{}", c),
            Cell::Arrow(dir) => write!(f, "{}", dir.code()),
            Cell::Marker(s) => write!(f, "{}", s),
        }
    }
}

impl From<u32> for Cell {
    fn from(n: u32) -> Self {
        Cell::Number(n)
    }
}

impl From<char> for Cell {
    fn from(c: char) -> Self {
        Cell::Letter(c)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Cell;
    use crate::grid::position::Direction;

    #[test]
    fn parse_covers_every_token_class() {
        assert_eq!(Cell::parse("-"), Cell::Blank);
        assert_eq!(Cell::parse(""), Cell::Blank);
        assert_eq!(Cell::parse("7"), Cell::Number(7));
        assert_eq!(Cell::parse("12"), Cell::Number(12));
        assert_eq!(Cell::parse("a"), Cell::Letter('a'));
        assert_eq!(Cell::parse("B"), Cell::Letter('B'));
        assert_eq!(Cell::parse("DR"), Cell::Arrow(Direction::DownRight));
        assert_eq!(Cell::parse("+"), Cell::Marker("+".to_string()));
        assert_eq!(Cell::parse("xy"), Cell::Marker("xy".to_string()));
    }

    #[test]
    fn directional_codes_win_over_letters() {
        // "U" is both a single letter and a code; codes take precedence so
        // arrow puzzles parse the way their authors wrote them.
        assert_eq!(Cell::parse("U"), Cell::Arrow(Direction::Up));
    }

    #[test]
    fn display_round_trips() {
        for token in ["-", "0", "42", "z", "UL", "+", "=="] {
            assert_eq!(Cell::parse(token).to_string(), token);
        }
        // The empty string normalizes to the canonical blank spelling.
        assert_eq!(Cell::parse("").to_string(), "-");
    }
}
