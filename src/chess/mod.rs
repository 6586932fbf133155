pub use self::board::{Board, CastlingRights, SideRights};
pub use self::error::ChessError;
pub use self::fen::{Position, STARTING_FEN};
pub use self::moves::Move;
pub use self::piece::{Color, Piece, PieceType};
pub use self::square::Square;

mod board;
mod error;
pub mod fen;
mod moves;
mod piece;
mod square;
