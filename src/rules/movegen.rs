use super::attacks::{is_check, is_square_attacked};
use super::{LegalityPolicy, MoveOptions};
use crate::chess::{Board, Color, Move, Piece, PieceType, Square};
use tracing::trace;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Destinations the piece on `from` could move to, ignoring self-check.
///
/// Empty when the square is empty or holds a frozen piece.
pub fn pseudo_legal_moves(board: &Board, from: Square, opts: &MoveOptions) -> Vec<Square> {
    let Some(piece) = board.get_piece(from) else {
        return Vec::new();
    };

    if opts.frozen.is_some_and(|f| f.is_frozen(from)) {
        return Vec::new();
    }

    match piece.piece_type {
        PieceType::Pawn => pawn_moves(board, from, piece, opts.ghost),
        PieceType::Knight => step_moves(board, from, piece, &KNIGHT_OFFSETS),
        PieceType::Bishop => sliding_moves(board, from, piece, &DIAGONALS, opts.ghost),
        PieceType::Rook => sliding_moves(board, from, piece, &ORTHOGONALS, opts.ghost),
        PieceType::Queen => {
            let mut moves = sliding_moves(board, from, piece, &DIAGONALS, opts.ghost);
            moves.extend(sliding_moves(board, from, piece, &ORTHOGONALS, opts.ghost));
            moves
        }
        PieceType::King => {
            let mut moves = step_moves(board, from, piece, &KING_OFFSETS);
            if opts.include_castling {
                moves.extend(castling_moves(board, from, piece, opts));
            }
            moves
        }
    }
}

/// Build the move from `from` to `to`, flagging castling when a king moves more than one column
pub fn move_for(board: &Board, from: Square, to: Square) -> Move {
    let is_king = board.get_piece(from).is_some_and(|p| p.is_king());
    if is_king && from.col.abs_diff(to.col) > 1 {
        Move::castling(from, to)
    } else {
        Move::new(from, to)
    }
}

/// Pseudo-legal destinations filtered by `policy`
pub fn legal_moves(
    board: &Board,
    from: Square,
    opts: &MoveOptions,
    policy: LegalityPolicy,
) -> Vec<Square> {
    let Some(piece) = board.get_piece(from) else {
        return Vec::new();
    };

    let pseudo = pseudo_legal_moves(board, from, opts);
    let moves: Vec<Square> = match policy {
        LegalityPolicy::Permissive => pseudo,
        LegalityPolicy::Standard => pseudo
            .into_iter()
            .filter(|&to| {
                let next = board.apply(&move_for(board, from, to));
                !is_check(&next, piece.color)
            })
            .collect(),
    };

    trace!("{} legal moves for {} on {}", moves.len(), piece.piece_type, from);
    moves
}

/// Whether any piece of `color` has at least one legal move
pub fn has_any_legal_move(
    board: &Board,
    color: Color,
    opts: &MoveOptions,
    policy: LegalityPolicy,
) -> bool {
    board
        .pieces_of(color)
        .any(|(sq, _)| !legal_moves(board, sq, opts, policy).is_empty())
}

fn can_land(board: &Board, to: Square, piece: Piece) -> bool {
    board.get_piece(to).map_or(true, |p| p.color != piece.color)
}

fn step_moves(board: &Board, from: Square, piece: Piece, offsets: &[(i8, i8)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&to| can_land(board, to, piece))
        .collect()
}

fn pawn_moves(board: &Board, from: Square, piece: Piece, ghost: bool) -> Vec<Square> {
    let mut moves = Vec::new();
    let dir = piece.color.forward();

    if let Some(one) = from.offset(dir, 0) {
        let one_empty = board.is_empty(one);
        if one_empty {
            moves.push(one);
        }

        if from.row == piece.color.pawn_row() && (one_empty || ghost) {
            if let Some(two) = from.offset(2 * dir, 0) {
                if board.is_empty(two) {
                    moves.push(two);
                }
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(to) = from.offset(dir, dc) {
            if board.get_piece(to).is_some_and(|p| p.color != piece.color) {
                moves.push(to);
            }
        }
    }

    moves
}

/// Cast rays along `directions`. Without ghost mode a ray ends at the first
/// occupied square. With ghost mode it passes through enemy pieces (each one
/// still a capture destination) and ends at the first friendly piece.
fn sliding_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    directions: &[(i8, i8)],
    ghost: bool,
) -> Vec<Square> {
    let mut moves = Vec::new();

    for &(dr, dc) in directions {
        let mut current = from.offset(dr, dc);
        while let Some(to) = current {
            match board.get_piece(to) {
                None => moves.push(to),
                Some(other) if other.color == piece.color => break,
                Some(_) => {
                    moves.push(to);
                    if !ghost {
                        break;
                    }
                }
            }
            current = to.offset(dr, dc);
        }
    }

    moves
}

fn castling_moves(board: &Board, from: Square, king: Piece, opts: &MoveOptions) -> Vec<Square> {
    let mut moves = Vec::new();
    let Some(rights) = opts.castling_rights.map(|r| r.for_color(king.color)) else {
        return moves;
    };

    let row = king.color.home_row();
    if from != Square::new_unchecked(row, 4) {
        return moves;
    }

    let enemy = king.color.opposite();
    let at = |col: u8| Square::new_unchecked(row, col);
    let rook_ready = |col: u8| {
        board.get_piece(at(col)) == Some(Piece::new(PieceType::Rook, king.color))
            && !opts.frozen.is_some_and(|f| f.is_frozen(at(col)))
    };
    let safe = |cols: &[u8]| cols.iter().all(|&c| !is_square_attacked(board, at(c), enemy));
    let empty = |cols: &[u8]| cols.iter().all(|&c| board.is_empty(at(c)));

    if rights.kingside && rook_ready(7) && empty(&[5, 6]) && safe(&[4, 5, 6]) {
        moves.push(at(6));
    }
    if rights.queenside && rook_ready(0) && empty(&[1, 2, 3]) && safe(&[4, 3, 2]) {
        moves.push(at(2));
    }

    moves
}
