//! Client side of the external move-search collaborator.
//!
//! The rules core never searches. It hands a FEN and a depth to an engine and
//! receives a best-move token (plus an optional score) that is fed back into
//! the game as an ordinary move. The engine only knows standard chess, so the
//! request lists the moves it may choose from.

pub mod uci;

pub use uci::{UciEngine, UciSession};

use crate::chess::{ChessError, Color, Move};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const MAX_SEARCH_DEPTH: u8 = 15;
pub const DEFAULT_SEARCH_DEPTH: u8 = 10;
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Clamp a requested depth into 1..=MAX_SEARCH_DEPTH
pub fn clamp_depth(depth: u8) -> u8 {
    depth.clamp(1, MAX_SEARCH_DEPTH)
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to start engine: {0}")]
    Spawn(std::io::Error),

    #[error("Engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Engine protocol error: {0}")]
    Protocol(String),

    #[error("Engine has no move in this position")]
    NoMove,

    #[error("Malformed move from engine: {0}")]
    Format(#[from] ChessError),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Engine evaluation from the perspective of the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Score {
    Centipawns(i32),
    /// Mate in N moves; negative when the side to move is being mated
    MateIn(i32),
}

impl Score {
    /// The same evaluation seen from White's side, given who was to move
    pub fn for_white(self, side_to_move: Color) -> Score {
        match (self, side_to_move) {
            (score, Color::White) => score,
            (Score::Centipawns(cp), Color::Black) => Score::Centipawns(-cp),
            (Score::MateIn(n), Color::Black) => Score::MateIn(-n),
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Centipawns(cp) => write!(f, "{:+.2}", *cp as f64 / 100.0),
            Score::MateIn(n) => write!(f, "#{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub fen: String,
    pub depth: u8,
    /// Restrict the search to these moves; empty means every move the engine knows
    pub search_moves: Vec<Move>,
}

impl SearchRequest {
    pub fn new(fen: impl Into<String>, depth: u8) -> Self {
        Self {
            fen: fen.into(),
            depth: clamp_depth(depth),
            search_moves: Vec::new(),
        }
    }

    /// Only consider `moves`. Frozen pieces and ghost moves are invisible to the engine.
    pub fn with_search_moves(mut self, moves: Vec<Move>) -> Self {
        self.search_moves = moves;
        self
    }

    /// The `go` command for this request
    pub fn go_command(&self) -> String {
        let mut command = format!("go depth {}", self.depth);
        if !self.search_moves.is_empty() {
            command.push_str(" searchmoves");
            for mv in &self.search_moves {
                command.push(' ');
                command.push_str(&mv.to_string());
            }
        }
        command
    }
}

/// A best move, tagged with the position it was computed for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReply {
    pub fen: String,
    pub best_move: Move,
    pub score: Option<Score>,
}

/// Pull the move token out of `bestmove e2e4 ponder e7e5` or a bare `e2e4`
pub fn extract_move_token(text: &str) -> Option<&str> {
    let mut parts = text.split_whitespace();
    let first = parts.next()?;
    let token = if first == "bestmove" { parts.next()? } else { first };
    if token == "(none)" {
        None
    } else {
        Some(token)
    }
}
