use super::moves::Move;
use super::{Color, Piece, PieceType, Square};
use serde::{Deserialize, Serialize};

/// Castling availability for one color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideRights {
    pub kingside: bool,
    pub queenside: bool,
}

/// Castling rights for both players. Rights only ever go from true to false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white: SideRights,
    pub black: SideRights,
}

impl CastlingRights {
    /// Create new castling rights with all castling available
    pub fn new() -> Self {
        let all = SideRights {
            kingside: true,
            queenside: true,
        };
        Self {
            white: all,
            black: all,
        }
    }

    /// No castling for anyone
    pub fn none() -> Self {
        let none = SideRights {
            kingside: false,
            queenside: false,
        };
        Self {
            white: none,
            black: none,
        }
    }

    pub fn for_color(&self, color: Color) -> SideRights {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    fn for_color_mut(&mut self, color: Color) -> &mut SideRights {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Remove castling rights for a color (when king moves)
    pub fn remove_all_for_color(&mut self, color: Color) {
        let rights = self.for_color_mut(color);
        rights.kingside = false;
        rights.queenside = false;
    }

    /// Remove the right tied to a rook home square, if `square` is one
    pub fn remove_rook_rights(&mut self, square: Square) {
        match (square.row, square.col) {
            (7, 0) => self.white.queenside = false, // a1
            (7, 7) => self.white.kingside = false,  // h1
            (0, 0) => self.black.queenside = false, // a8
            (0, 7) => self.black.kingside = false,  // h8
            _ => {}
        }
    }

    /// Clear rights affected by `mv` being played on `board` (before the move)
    pub fn update_for_move(&mut self, board: &Board, mv: &Move) {
        if let Some(piece) = board.get_piece(mv.from) {
            match piece.piece_type {
                PieceType::King => self.remove_all_for_color(piece.color),
                PieceType::Rook => self.remove_rook_rights(mv.from),
                _ => {}
            }
        }

        if let Some(captured) = board.get_piece(mv.to) {
            if captured.piece_type == PieceType::Rook {
                self.remove_rook_rights(mv.to);
            }
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::new()
    }
}

/// 8x8 grid of optional pieces
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// squares[row][col], row 0 = rank 8, col 0 = file a
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Create a new board with the standard starting position
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_starting_position();
        board
    }

    /// A board with no pieces
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    pub(crate) fn from_squares(squares: [[Option<Piece>; 8]; 8]) -> Self {
        Self { squares }
    }

    pub fn get_piece(&self, sq: Square) -> Option<Piece> {
        if sq.row > 7 || sq.col > 7 {
            return None;
        }
        self.squares[sq.row as usize][sq.col as usize]
    }

    /// Set or clear a square. Out-of-range squares are ignored.
    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        if sq.row > 7 || sq.col > 7 {
            return;
        }
        self.squares[sq.row as usize][sq.col as usize] = piece;
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.get_piece(sq).is_none()
    }

    /// Every occupied square with its piece
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get_piece(sq).map(|p| (sq, p)))
    }

    /// Occupied squares of one color
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.piece_type == PieceType::King)
            .map(|(sq, _)| sq)
    }

    pub(crate) fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.squares
    }

    fn setup_starting_position(&mut self) {
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for color in [Color::White, Color::Black] {
            let home = color.home_row() as usize;
            let pawns = color.pawn_row() as usize;
            for (col, &piece_type) in back_rank.iter().enumerate() {
                self.squares[home][col] = Some(Piece::new(piece_type, color));
                self.squares[pawns][col] = Some(Piece::new(PieceType::Pawn, color));
            }
        }
    }

    /// Apply a move and return the resulting board; `self` is left untouched.
    ///
    /// Handles captures by overwrite, promotion (to `mv.promotion`, queen by
    /// default) and the rook hop of a castling move. No legality checking is
    /// done: callers pass moves produced by the move generator.
    pub fn apply(&self, mv: &Move) -> Board {
        let mut next = self.clone();
        let Some(piece) = next.get_piece(mv.from) else {
            return next;
        };

        next.set_piece(mv.from, None);

        let placed = if piece.piece_type == PieceType::Pawn
            && mv.to.row == piece.color.promotion_row()
        {
            Piece::new(mv.promotion.unwrap_or(PieceType::Queen), piece.color)
        } else {
            piece
        };
        next.set_piece(mv.to, Some(placed));

        if mv.is_castling {
            let row = mv.to.row;
            let rook_cols = match mv.to.col {
                6 => Some((7, 5)),
                2 => Some((0, 3)),
                _ => None,
            };
            if let Some((rook_from, rook_to)) = rook_cols {
                let rook = next.get_piece(Square::new_unchecked(row, rook_from));
                next.set_piece(Square::new_unchecked(row, rook_from), None);
                next.set_piece(Square::new_unchecked(row, rook_to), rook);
            }
        }

        next
    }

    /// Display the board as text from White's perspective, rank 8 on top
    pub fn to_ascii(&self) -> String {
        let mut result = String::new();
        result.push_str("  a b c d e f g h\n");

        for row in 0..8u8 {
            let rank_number = 8 - row;
            result.push_str(&format!("{rank_number} "));

            for col in 0..8u8 {
                let symbol = match self.get_piece(Square::new_unchecked(row, col)) {
                    Some(piece) => piece.fen_char(),
                    None => '.',
                };
                result.push(symbol);
                if col < 7 {
                    result.push(' ');
                }
            }

            result.push_str(&format!(" {rank_number}\n"));
        }

        result.push_str("  a b c d e f g h");
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
