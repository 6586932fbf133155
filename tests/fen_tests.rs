mod common;

use common::*;
use spellchess::chess::fen::{self, STARTING_FEN};
use spellchess::chess::{
    Board, CastlingRights, ChessError, Color, Move, Piece, PieceType, Position, Square,
};

/// Position codec tests: FEN placement, full positions, squares and move tokens
#[cfg(test)]
mod fen_codec_tests {
    use super::*;

    #[test]
    fn test_starting_placement_decodes_to_initial_board() {
        let board = fen::decode(STARTING_FEN).expect("starting FEN is valid");
        assert_eq!(board, Board::new());

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
        for (col, piece_type) in back_rank.into_iter().enumerate() {
            let col = col as u8;
            assert_eq!(
                board.get_piece(Square::new_unchecked(0, col)),
                Some(Piece::new(piece_type, Color::Black))
            );
            assert_eq!(
                board.get_piece(Square::new_unchecked(1, col)),
                Some(Piece::new(PieceType::Pawn, Color::Black))
            );
            assert_eq!(
                board.get_piece(Square::new_unchecked(6, col)),
                Some(Piece::new(PieceType::Pawn, Color::White))
            );
            assert_eq!(
                board.get_piece(Square::new_unchecked(7, col)),
                Some(Piece::new(piece_type, Color::White))
            );
        }

        for row in 2..6 {
            for col in 0..8 {
                assert!(board.is_empty(Square::new_unchecked(row, col)));
            }
        }
    }

    #[test]
    fn test_encode_initial_board() {
        let text = fen::encode(
            &Board::new(),
            Color::White,
            &CastlingRights::new(),
            None,
            0,
            1,
        );
        assert_eq!(text, STARTING_FEN);
    }

    /// Decoding an encoded board gives the same board back
    #[test]
    fn test_placement_round_trip() {
        let placements = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "r3k2r/8/8/8/8/8/8/R3K2R",
            "4k3/8/8/3p4/8/8/8/3QK3",
            "8/8/8/8/8/8/8/8",
            "k7/8/1Q6/8/8/8/8/7K",
        ];

        for placement in placements {
            let decoded = board(placement);
            assert_eq!(fen::encode_placement(&decoded), placement);
            assert_eq!(fen::decode(&fen::encode_placement(&decoded)).unwrap(), decoded);
        }
    }

    #[test]
    fn test_decode_rejects_malformed_placement() {
        let invalid = [
            "",
            "rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR",
            "rnbqkbnr/pppppppp/0/8/8/8/PPPPPPPP/RNBQKBNR",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP",
            "rnbqkbnr/pppppppp/8/8/8/8/8/PPPPPPPP/RNBQKBNR",
        ];

        for placement in invalid {
            assert!(
                matches!(fen::decode(placement), Err(ChessError::InvalidFen(_))),
                "'{}' should be rejected",
                placement
            );
        }
    }

    #[test]
    fn test_full_position_fields() {
        let text = "r3k2r/8/8/8/8/8/8/R3K2R b Kq e3 3 12";
        let position = Position::from_fen(text).expect("valid position");

        assert_eq!(position.turn, Color::Black);
        assert!(position.castling.white.kingside);
        assert!(!position.castling.white.queenside);
        assert!(!position.castling.black.kingside);
        assert!(position.castling.black.queenside);
        assert_eq!(position.en_passant, Some(sq("e3")));
        assert_eq!(position.halfmove_clock, 3);
        assert_eq!(position.fullmove_number, 12);
        assert_eq!(position.to_fen(), text);
    }

    #[test]
    fn test_position_rejects_bad_fields() {
        let invalid = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkX - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0",
        ];

        for text in invalid {
            assert!(Position::from_fen(text).is_err(), "'{}' should be rejected", text);
        }
    }

    #[test]
    fn test_no_castling_rights_field() {
        let position: Position = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(position.castling, CastlingRights::none());
        assert_eq!(position.to_fen(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }
}

#[cfg(test)]
mod square_and_move_tests {
    use super::*;

    #[test]
    fn test_square_coordinates() {
        assert_eq!(sq("a8"), Square::new_unchecked(0, 0));
        assert_eq!(sq("h1"), Square::new_unchecked(7, 7));
        assert_eq!(sq("e2"), Square::new_unchecked(6, 4));
        assert_eq!(Square::new_unchecked(4, 4).to_string(), "e4");

        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
        assert!(Square::new(8, 0).is_err());
    }

    #[test]
    fn test_move_tokens() {
        let push = mv("e2e4");
        assert_eq!(push.from, sq("e2"));
        assert_eq!(push.to, sq("e4"));
        assert_eq!(push.promotion, None);

        assert_eq!(mv("e7e8q").promotion, Some(PieceType::Queen));
        assert_eq!(mv("a7a8n").promotion, Some(PieceType::Knight));
        assert_eq!(mv("e7e8q").to_string(), "e7e8q");
    }

    #[test]
    fn test_move_tokens_rejected() {
        for token in ["e2", "z2e4", "e2e9", "e7e8k", "e2e4qq", "e2e2"] {
            assert!(
                matches!(Move::from_uci(token), Err(ChessError::InvalidMove(_))),
                "'{}' should be rejected",
                token
            );
        }
    }
}
