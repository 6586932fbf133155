pub mod chess;
pub mod cli;
pub mod engine;
pub mod game;
pub mod rules;

// Re-export key types for easy testing
pub use chess::{Board, ChessError, Color, Move, Piece, PieceType, Position, Square};
pub use game::{GameConfig, GameError, GameState, GameStatus};
pub use rules::LegalityPolicy;
