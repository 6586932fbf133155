use super::error::ChessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A board coordinate. Row 0 is rank 8 (black's back rank), row 7 is rank 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8, // 0-7 corresponding to ranks 8-1
    pub col: u8, // 0-7 corresponding to files a-h
}

impl Square {
    pub fn new(row: u8, col: u8) -> Result<Self, ChessError> {
        if row > 7 {
            return Err(ChessError::InvalidSquare(format!(
                "Row must be 0-7, got {}",
                row
            )));
        }
        if col > 7 {
            return Err(ChessError::InvalidSquare(format!(
                "Column must be 0-7, got {}",
                col
            )));
        }

        Ok(Self { row, col })
    }

    /// Create a square without validation (for internal use when bounds are guaranteed)
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Create a square from file and rank characters
    pub fn from_chars(file: char, rank: char) -> Result<Self, ChessError> {
        let file_lower = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file_lower) {
            return Err(ChessError::InvalidSquare(format!(
                "Invalid file '{}'. Must be a-h.",
                file
            )));
        }

        if !('1'..='8').contains(&rank) {
            return Err(ChessError::InvalidSquare(format!(
                "Invalid rank '{}'. Must be 1-8.",
                rank
            )));
        }

        Ok(Square {
            row: 8 - (rank as u8 - b'0'),
            col: file_lower as u8 - b'a',
        })
    }

    /// Square shifted by a row/column delta, if still on the board
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new_unchecked(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn file_char(&self) -> char {
        (self.col + b'a') as char
    }

    pub fn rank_char(&self) -> char {
        (b'8' - self.row) as char
    }

    /// All 64 squares, row by row from rank 8
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|row| (0..8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Self::from_chars(file, rank),
            _ => Err(ChessError::InvalidSquare(format!(
                "Square must be exactly 2 characters (e.g., 'e4'), got '{}'",
                s
            ))),
        }
    }
}
