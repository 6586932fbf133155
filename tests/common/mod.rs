//! Shared helpers for the integration tests
#![allow(dead_code)]

use spellchess::chess::{fen, Board, Move, Position, Square};
use spellchess::game::{GameConfig, GameState};

/// Parse an algebraic square name such as `e4`
pub fn sq(name: &str) -> Square {
    name.parse().expect("valid square name")
}

/// Parse a UCI move such as `e2e4` or `e7e8n`
pub fn mv(uci: &str) -> Move {
    Move::from_uci(uci).expect("valid uci move")
}

/// Board from the piece-placement field of a FEN
pub fn board(placement: &str) -> Board {
    fen::decode(placement).expect("valid piece placement")
}

/// Sorted list of squares, for order-independent comparisons
pub fn squares(names: &[&str]) -> Vec<Square> {
    sorted(names.iter().map(|n| sq(n)).collect())
}

pub fn sorted(mut list: Vec<Square>) -> Vec<Square> {
    list.sort();
    list
}

/// Game started from a full FEN
pub fn game_from(config: GameConfig, fen: &str) -> GameState {
    let position = Position::from_fen(fen).expect("valid fen");
    GameState::from_position(config, position)
}

/// Play a sequence of UCI moves, panicking on the first illegal one
pub fn play(game: &mut GameState, moves: &[&str]) {
    for uci in moves {
        game.try_move(mv(uci))
            .unwrap_or_else(|e| panic!("{} should be legal: {}", uci, e));
    }
}
