use super::spells::Spell;
use super::state::GameStatus;
use crate::chess::{Color, Move};
use thiserror::Error;

/// Rejections from the game state machine. None of them change the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: String },

    #[error("Stale engine reply: {0}")]
    StaleReply(String),

    #[error("{spell} is not available to {color}")]
    SpellUnavailable { spell: Spell, color: Color },

    #[error("Game is over ({0})")]
    GameOver(GameStatus),
}

pub type GameResult<T> = Result<T, GameError>;
