mod common;

use common::*;
use spellchess::chess::{Board, Color};
use spellchess::game::FrozenPieces;
use spellchess::rules::{
    is_check, is_checkmate, is_checkmate_with, is_square_attacked, is_stalemate_with,
    LegalityPolicy, MoveOptions,
};

/// Attack, check, checkmate and stalemate detection
#[cfg(test)]
mod check_detection_tests {
    use super::*;

    #[test]
    fn test_square_attacks_in_start_position() {
        let b = Board::new();

        assert!(is_square_attacked(&b, sq("f3"), Color::White));
        assert!(is_square_attacked(&b, sq("f6"), Color::Black));
        assert!(!is_square_attacked(&b, sq("e5"), Color::White));
        assert!(!is_square_attacked(&b, sq("e4"), Color::Black));
        // Own pieces are never attacked by their own side
        assert!(!is_square_attacked(&b, sq("e2"), Color::White));
    }

    #[test]
    fn test_sliding_attack_blocked() {
        let b = board("4k3/8/8/8/4r3/8/4P3/4K3");
        assert!(is_square_attacked(&b, sq("e3"), Color::Black));
        assert!(!is_check(&b, Color::White));
    }

    #[test]
    fn test_back_rank_style_mate() {
        let b = board("4k3/8/8/8/8/8/qr6/K7");
        assert!(is_check(&b, Color::White));
        assert!(is_checkmate(&b, Color::White));
        assert!(!is_checkmate(&b, Color::Black));
    }

    #[test]
    fn test_check_with_escape_is_not_mate() {
        let b = board("4k3/8/8/8/8/8/q7/K7");
        assert!(is_check(&b, Color::White));
        assert!(!is_checkmate(&b, Color::White));
    }

    #[test]
    fn test_missing_king_is_not_in_check() {
        let b = board("8/8/8/8/8/8/8/r7");
        assert!(!is_check(&b, Color::White));
        assert!(!is_checkmate(&b, Color::White));
    }

    /// A frozen attacker still gives check, but a frozen defender cannot help
    #[test]
    fn test_freeze_and_check() {
        // White queen checks from e1, black rook on a4 can block on e4
        let b = board("4k3/8/8/8/r7/8/8/K3Q3");
        assert!(is_check(&b, Color::Black));

        let mut defender_frozen = FrozenPieces::new();
        defender_frozen.freeze(sq("e8"), 4);
        let opts = MoveOptions::basic().with_frozen(&defender_frozen);
        assert!(!is_checkmate(&b, Color::Black));
        assert!(!is_checkmate_with(&b, Color::Black, &opts));

        defender_frozen.freeze(sq("a4"), 4);
        let opts = MoveOptions::basic().with_frozen(&defender_frozen);
        assert!(is_checkmate_with(&b, Color::Black, &opts));

        defender_frozen.freeze(sq("e1"), 4);
        let opts = MoveOptions::basic().with_frozen(&defender_frozen);
        assert!(is_checkmate_with(&b, Color::Black, &opts));
    }

    #[test]
    fn test_stalemate() {
        let b = board("k7/8/1Q6/8/8/8/8/7K");
        let opts = MoveOptions::basic();

        assert!(!is_check(&b, Color::Black));
        assert!(is_stalemate_with(&b, Color::Black, &opts, LegalityPolicy::Standard));
        assert!(!is_stalemate_with(&b, Color::Black, &opts, LegalityPolicy::Permissive));
        assert!(!is_stalemate_with(&b, Color::White, &opts, LegalityPolicy::Standard));
    }

    #[test]
    fn test_checkmated_side_is_not_stalemated() {
        let b = board("4k3/8/8/8/8/8/qr6/K7");
        assert!(!is_stalemate_with(
            &b,
            Color::White,
            &MoveOptions::basic(),
            LegalityPolicy::Standard
        ));
    }
}
