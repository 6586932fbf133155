//! Piece movement, legality filtering and check detection.

pub mod attacks;
pub mod movegen;

pub use attacks::{
    is_check, is_checkmate, is_checkmate_with, is_square_attacked, is_stalemate_with,
};
pub use movegen::{has_any_legal_move, legal_moves, move_for, pseudo_legal_moves};

use crate::chess::CastlingRights;
use crate::game::FrozenPieces;
use serde::{Deserialize, Serialize};

/// How pseudo-legal moves are filtered into legal ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegalityPolicy {
    /// Reject moves that leave the mover's own king in check
    Standard,
    /// Any pseudo-legal move is legal; kings may be left en prise and captured
    Permissive,
}

/// Inputs to move generation beyond the board itself
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOptions<'a> {
    /// Generate castling moves for kings. Attack queries always turn this off.
    pub include_castling: bool,
    pub castling_rights: Option<CastlingRights>,
    /// Ghost mode for the side whose piece is being generated
    pub ghost: bool,
    pub frozen: Option<&'a FrozenPieces>,
}

impl<'a> MoveOptions<'a> {
    /// Plain piece movement: no castling, no ghost, no freeze timers
    pub fn basic() -> Self {
        Self::default()
    }

    /// Options used when probing attacked squares
    pub(crate) fn attack_query() -> Self {
        Self::default()
    }

    pub fn with_castling(mut self, rights: CastlingRights) -> Self {
        self.include_castling = true;
        self.castling_rights = Some(rights);
        self
    }

    pub fn with_ghost(mut self, ghost: bool) -> Self {
        self.ghost = ghost;
        self
    }

    pub fn with_frozen(mut self, frozen: &'a FrozenPieces) -> Self {
        self.frozen = Some(frozen);
        self
    }
}
