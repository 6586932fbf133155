use super::movegen::{has_any_legal_move, pseudo_legal_moves};
use super::{LegalityPolicy, MoveOptions};
use crate::chess::{Board, Color, Square};

/// True iff some piece of `by_color` has `square` among its pseudo-legal destinations.
///
/// Castling is never generated here (castling legality itself asks this
/// question), ghost mode is off and freeze timers are ignored: a frozen
/// piece still gives check.
pub fn is_square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    let query = MoveOptions::attack_query();
    board
        .pieces_of(by_color)
        .any(|(from, _)| pseudo_legal_moves(board, from, &query).contains(&square))
}

/// Whether `color`'s king is attacked. A missing king is not "in check".
pub fn is_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => false,
    }
}

/// In check with no legal move under the standard policy
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_checkmate_with(board, color, &MoveOptions::basic())
}

/// Checkmate test honouring extra move options such as freeze timers
pub fn is_checkmate_with(board: &Board, color: Color, opts: &MoveOptions) -> bool {
    is_check(board, color) && !has_any_legal_move(board, color, opts, LegalityPolicy::Standard)
}

/// Not in check and no legal move under `policy`
pub fn is_stalemate_with(
    board: &Board,
    color: Color,
    opts: &MoveOptions,
    policy: LegalityPolicy,
) -> bool {
    !is_check(board, color) && !has_any_legal_move(board, color, opts, policy)
}
