//! Forsyth-Edwards Notation: the position text exchanged with the search engine.

use super::board::{Board, CastlingRights};
use super::{ChessError, Color, Piece, Square};
use std::fmt;
use std::str::FromStr;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse the piece-placement field of a FEN string.
///
/// Only the first whitespace-separated token is read, so both a bare
/// placement and a full six-field FEN are accepted.
pub fn decode(text: &str) -> Result<Board, ChessError> {
    let placement = text
        .split_whitespace()
        .next()
        .ok_or_else(|| ChessError::InvalidFen("FEN string cannot be empty".to_string()))?;

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        let found_ranks = ranks.len();
        return Err(ChessError::InvalidFen(format!(
            "Piece placement must have exactly 8 ranks separated by '/', found {found_ranks}"
        )));
    }

    let mut squares = [[None; 8]; 8];

    for (row, rank_str) in ranks.iter().enumerate() {
        let rank_number = 8 - row;
        let mut col = 0usize;

        for c in rank_str.chars() {
            if let Some(run) = c.to_digit(10) {
                let run = run as usize;
                if run == 0 || run > 8 {
                    return Err(ChessError::InvalidFen(format!(
                        "Invalid empty square count '{c}' in rank {rank_number} (must be 1-8)"
                    )));
                }
                col += run;
            } else {
                if col >= 8 {
                    return Err(ChessError::InvalidFen(format!(
                        "Rank {rank_number} has more than 8 squares"
                    )));
                }
                let piece = Piece::from_fen_char(c).map_err(|_| {
                    let position = col + 1;
                    ChessError::InvalidFen(format!(
                        "Invalid piece character '{c}' in rank {rank_number} at position {position} (valid pieces: KQRBNPkqrbnp)"
                    ))
                })?;
                squares[row][col] = Some(piece);
                col += 1;
            }
        }

        if col != 8 {
            return Err(ChessError::InvalidFen(format!(
                "Rank {rank_number} must represent exactly 8 squares, found {col}"
            )));
        }
    }

    Ok(Board::from_squares(squares))
}

/// Build a full six-field FEN string
pub fn encode(
    board: &Board,
    turn: Color,
    castling: &CastlingRights,
    en_passant: Option<Square>,
    halfmove: u32,
    fullmove: u32,
) -> String {
    let placement = encode_placement(board);
    let active = turn.fen_char();
    let castling = castling_to_fen(castling);
    let en_passant = en_passant.map_or_else(|| "-".to_string(), |sq| sq.to_string());

    format!("{placement} {active} {castling} {en_passant} {halfmove} {fullmove}")
}

/// Piece placement field, runs of empty squares collapsed to digits
pub fn encode_placement(board: &Board) -> String {
    let mut ranks = Vec::with_capacity(8);

    for row in board.rows() {
        let mut rank_string = String::new();
        let mut empty_count = 0;

        for cell in row {
            match cell {
                Some(piece) => {
                    if empty_count > 0 {
                        rank_string.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    rank_string.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            rank_string.push_str(&empty_count.to_string());
        }
        ranks.push(rank_string);
    }

    ranks.join("/")
}

pub fn castling_to_fen(rights: &CastlingRights) -> String {
    let mut result = String::new();
    if rights.white.kingside {
        result.push('K');
    }
    if rights.white.queenside {
        result.push('Q');
    }
    if rights.black.kingside {
        result.push('k');
    }
    if rights.black.queenside {
        result.push('q');
    }

    if result.is_empty() {
        "-".to_string()
    } else {
        result
    }
}

pub fn castling_from_fen(field: &str) -> Result<CastlingRights, ChessError> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }

    for c in field.chars() {
        let slot = match c {
            'K' => &mut rights.white.kingside,
            'Q' => &mut rights.white.queenside,
            'k' => &mut rights.black.kingside,
            'q' => &mut rights.black.queenside,
            _ => {
                return Err(ChessError::InvalidFen(format!(
                    "Invalid castling rights character '{c}' (valid: K, Q, k, q, or - for none)"
                )))
            }
        };
        if *slot {
            return Err(ChessError::InvalidFen(format!(
                "Duplicate character '{c}' in castling rights '{field}'"
            )));
        }
        *slot = true;
    }

    Ok(rights)
}

/// A board together with the side fields of a FEN record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub turn: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Position {
    /// The standard starting position
    pub fn starting() -> Self {
        Self {
            board: Board::new(),
            turn: Color::White,
            castling: CastlingRights::new(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let fen = fen.trim();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        let [placement, active_color, castling, en_passant, halfmove_str, fullmove_str] =
            parts.as_slice()
        else {
            let found_count = parts.len();
            return Err(ChessError::InvalidFen(format!(
                "FEN must have exactly 6 fields, found {found_count}"
            )));
        };

        let board = decode(placement)?;

        let turn = match *active_color {
            "w" => Color::White,
            "b" => Color::Black,
            _ => {
                return Err(ChessError::InvalidFen(format!(
                    "Invalid active color '{active_color}' (must be 'w' or 'b')"
                )))
            }
        };

        let castling = castling_from_fen(castling)?;

        let en_passant = if *en_passant == "-" {
            None
        } else {
            let sq = Square::from_str(en_passant)
                .map_err(|e| ChessError::InvalidFen(format!("En passant target: {e}")))?;
            if sq.rank_char() != '3' && sq.rank_char() != '6' {
                return Err(ChessError::InvalidFen(format!(
                    "Invalid en passant target '{en_passant}' (must be on rank 3 or 6)"
                )));
            }
            Some(sq)
        };

        let halfmove_clock = halfmove_str.parse::<u32>().map_err(|e| {
            ChessError::InvalidFen(format!("Invalid halfmove clock '{halfmove_str}': {e}"))
        })?;

        let fullmove_number = fullmove_str.parse::<u32>().map_err(|e| {
            ChessError::InvalidFen(format!("Invalid fullmove number '{fullmove_str}': {e}"))
        })?;
        if fullmove_number == 0 {
            return Err(ChessError::InvalidFen(
                "Fullmove number must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            board,
            turn,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    pub fn to_fen(&self) -> String {
        encode(
            &self.board,
            self.turn,
            &self.castling,
            self.en_passant,
            self.halfmove_clock,
            self.fullmove_number,
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}
