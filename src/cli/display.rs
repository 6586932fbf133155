use crate::chess::{Color, Square};
use crate::game::{GameState, GameStatus, InputMode, Spell};

/// Render the game board from White's side.
///
/// `[x]` selected piece, `(x)` move target, `{x}` frozen piece.
pub fn render_board(game: &GameState) -> String {
    let board = game.board();
    let mut out = String::from("    a  b  c  d  e  f  g  h\n");

    for row in 0..8u8 {
        let rank = 8 - row;
        out.push_str(&format!("{rank}  "));
        for col in 0..8u8 {
            let sq = Square::new_unchecked(row, col);
            let symbol = board.get_piece(sq).map_or('.', |p| p.fen_char());
            let (open, close) = if game.selected() == Some(sq) {
                ('[', ']')
            } else if game.highlights().contains(&sq) {
                ('(', ')')
            } else if game.frozen().is_frozen(sq) {
                ('{', '}')
            } else {
                (' ', ' ')
            };
            out.push(open);
            out.push(symbol);
            out.push(close);
        }
        out.push_str(&format!(" {rank}\n"));
    }

    out.push_str("    a  b  c  d  e  f  g  h");
    out
}

fn spell_summary(game: &GameState, color: Color) -> String {
    let mut spells = Vec::new();
    for spell in [Spell::Freeze, Spell::Ghost] {
        if game.spell_available(color, spell) {
            spells.push(spell.to_string());
        }
    }
    if spells.is_empty() {
        "none".to_string()
    } else {
        spells.join(", ")
    }
}

/// One-paragraph summary of whose turn it is, spells, timers and the result
pub fn render_status(game: &GameState) -> String {
    let mut lines = Vec::new();

    match game.status() {
        GameStatus::Playing => {
            let turn = game.turn();
            let mut line = format!("{} to move", turn);
            if game.is_check(turn) {
                line.push_str(" (check)");
            }
            lines.push(line);
        }
        status => match game.winner() {
            Some(winner) => lines.push(format!("Game over: {}. {} wins.", status, winner)),
            None => lines.push(format!("Game over: {}.", status)),
        },
    }

    for color in [Color::White, Color::Black] {
        lines.push(format!("{} spells: {}", color, spell_summary(game, color)));
    }

    if let Some(color) = game.ghost_active() {
        lines.push(format!("Ghost walk active for {}", color));
    }
    if game.input_mode() == InputMode::FreezeTargeting {
        lines.push("Choose a piece to freeze ('cancel' to abort)".to_string());
    }
    for (sq, remaining) in game.frozen().iter() {
        lines.push(format!("{} frozen for {} more half-moves", sq, remaining));
    }

    lines.join("\n")
}

/// Numbered move list, continuing from the position the game started at
pub fn render_history(game: &GameState) -> String {
    if game.history().is_empty() {
        return "No moves yet.".to_string();
    }

    let (mut number, first_mover) = game.first_move();
    let mut moves = game.history().iter();
    let mut lines = Vec::new();

    if first_mover == Color::Black {
        if let Some(first) = moves.next() {
            lines.push(format!("{}... {}", number, first));
            number += 1;
        }
    }
    let rest: Vec<String> = moves.map(|m| m.to_string()).collect();
    for pair in rest.chunks(2) {
        lines.push(format!("{}. {}", number, pair.join(" ")));
        number += 1;
    }

    lines.join("\n")
}

/// Legal destinations of `from` as a JSON object for scripting
pub fn render_moves_json(from: Square, targets: &[Square]) -> serde_json::Result<String> {
    let targets: Vec<String> = targets.iter().map(|sq| sq.to_string()).collect();
    serde_json::to_string(&serde_json::json!({
        "from": from.to_string(),
        "targets": targets,
    }))
}
