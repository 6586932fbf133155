use super::error::ChessError;
use super::piece::PieceType;
use super::square::Square;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
    /// Set when a king moves more than one column; the executor relocates the rook on this flag
    pub is_castling: bool,
}

impl Move {
    /// Create a plain move
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            is_castling: false,
        }
    }

    /// Create a castling move (king squares only)
    pub const fn castling(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            is_castling: true,
        }
    }

    /// Create a promotion move with validation of the target piece
    pub fn with_promotion(
        from: Square,
        to: Square,
        promotion: PieceType,
    ) -> Result<Self, ChessError> {
        if !promotion.is_promotion_target() {
            return Err(ChessError::InvalidMove(format!(
                "Cannot promote to {}",
                promotion
            )));
        }

        Ok(Self {
            from,
            to,
            promotion: Some(promotion),
            is_castling: false,
        })
    }

    /// Parse a move token such as `e2e4` or `e7e8q`
    pub fn from_uci(s: &str) -> Result<Self, ChessError> {
        let s = s.trim();
        let chars: Vec<char> = s.chars().collect();

        if chars.len() != 4 && chars.len() != 5 {
            return Err(ChessError::InvalidMove(format!(
                "Invalid move format '{s}'. Expected 'e2e4', or 'e7e8q' for promotion."
            )));
        }

        let from = Square::from_chars(chars[0], chars[1])
            .map_err(|e| ChessError::InvalidMove(format!("Bad origin in '{s}': {e}")))?;
        let to = Square::from_chars(chars[2], chars[3])
            .map_err(|e| ChessError::InvalidMove(format!("Bad destination in '{s}': {e}")))?;

        if from == to {
            return Err(ChessError::InvalidMove(format!(
                "Source and destination are the same in '{s}'"
            )));
        }

        match chars.get(4) {
            Some(&c) => {
                let promotion = PieceType::from_char(c)
                    .map_err(|e| ChessError::InvalidMove(format!("Bad promotion in '{s}': {e}")))?;
                Self::with_promotion(from, to, promotion)
            }
            None => Ok(Self::new(from, to)),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}
