use super::config::{GameConfig, WinCondition};
use super::error::{GameError, GameResult};
use super::spells::{FrozenPieces, Spell, SpellAvailability};
use crate::chess::{Board, CastlingRights, Color, Move, PieceType, Position, Square};
use crate::rules::{self, MoveOptions};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, trace};

/// Half-moves without a capture or pawn move after which the game is drawn
pub const FIFTY_MOVE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    Playing,
    Checkmate,
    Stalemate,
    KingCaptured,
    Draw,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        *self != GameStatus::Playing
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Playing => write!(f, "playing"),
            GameStatus::Checkmate => write!(f, "checkmate"),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::KingCaptured => write!(f, "king captured"),
            GameStatus::Draw => write!(f, "draw"),
        }
    }
}

/// What the next click means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// The next click on an occupied square freezes that piece
    FreezeTargeting,
}

/// Result of a board click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected(Square),
    Deselected,
    Moved(Move),
    Froze(Square),
    Ignored,
}

/// A rules-state change applied by [`Snapshot::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Play a move for the side to move
    Move(Move),
    /// Side to move freezes the piece on `target`
    Freeze { target: Square, half_moves: u8 },
    /// Side to move enables ghost mode for its next move
    Ghost,
}

/// The rules state of one turn. Never mutated in place: every action yields a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub turn: Color,
    pub castling: CastlingRights,
    pub frozen: FrozenPieces,
    pub spells: SpellAvailability,
    /// Color whose next move is made in ghost mode
    pub ghost: Option<Color>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Snapshot {
    pub fn initial() -> Self {
        Self::from_position(Position::starting())
    }

    /// Start from an arbitrary position with fresh spells and no timers
    pub fn from_position(position: Position) -> Self {
        Self {
            board: position.board,
            turn: position.turn,
            castling: position.castling,
            frozen: FrozenPieces::new(),
            spells: SpellAvailability::new(),
            ghost: None,
            halfmove_clock: position.halfmove_clock,
            fullmove_number: position.fullmove_number,
        }
    }

    pub fn to_position(&self) -> Position {
        Position {
            board: self.board.clone(),
            turn: self.turn,
            castling: self.castling,
            en_passant: None,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    pub fn to_fen(&self) -> String {
        self.to_position().to_fen()
    }

    /// Move options for pieces of `color` in this snapshot
    pub fn move_options(&self, color: Color) -> MoveOptions<'_> {
        MoveOptions::basic()
            .with_castling(self.castling)
            .with_ghost(self.ghost == Some(color))
            .with_frozen(&self.frozen)
    }

    /// The single transition function for rules state
    pub fn apply(&self, action: &Action) -> Snapshot {
        let mut next = self.clone();
        match *action {
            Action::Move(mv) => {
                let captured = self.board.get_piece(mv.to);
                let is_pawn = self
                    .board
                    .get_piece(mv.from)
                    .is_some_and(|p| p.piece_type == PieceType::Pawn);

                if captured.is_some() {
                    next.frozen.release(mv.to);
                }
                next.frozen.tick();
                next.ghost = None;
                next.castling.update_for_move(&self.board, &mv);
                next.board = self.board.apply(&mv);

                next.halfmove_clock = if is_pawn || captured.is_some() {
                    0
                } else {
                    self.halfmove_clock + 1
                };
                if self.turn == Color::Black {
                    next.fullmove_number += 1;
                }
                next.turn = self.turn.opposite();
            }
            Action::Freeze { target, half_moves } => {
                next.frozen.freeze(target, half_moves);
                next.spells.consume(self.turn, Spell::Freeze);
            }
            Action::Ghost => {
                next.ghost = Some(self.turn);
                next.spells.consume(self.turn, Spell::Ghost);
            }
        }
        next
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::initial()
    }
}

/// One game session: rules snapshot plus selection and spell-targeting state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    snapshot: Snapshot,
    status: GameStatus,
    winner: Option<Color>,
    selected: Option<Square>,
    highlights: Vec<Square>,
    mode: InputMode,
    history: Vec<Move>,
    /// Fullmove number and side to move of the position the game started from
    first_move: (u32, Color),
}

impl GameState {
    /// New game from the standard starting position
    pub fn new(config: GameConfig) -> Self {
        Self::from_snapshot(config, Snapshot::initial())
    }

    /// New game from an arbitrary position
    pub fn from_position(config: GameConfig, position: Position) -> Self {
        Self::from_snapshot(config, Snapshot::from_position(position))
    }

    fn from_snapshot(config: GameConfig, snapshot: Snapshot) -> Self {
        Self {
            config,
            first_move: (snapshot.fullmove_number, snapshot.turn),
            status: GameStatus::Playing,
            winner: None,
            selected: None,
            highlights: Vec::new(),
            mode: InputMode::Normal,
            history: Vec::new(),
            snapshot,
        }
    }

    /// Throw everything away and start again from the starting position
    pub fn reset(&mut self) {
        info!("Resetting game");
        *self = Self::new(self.config.clone());
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn board(&self) -> &Board {
        &self.snapshot.board
    }

    pub fn turn(&self) -> Color {
        self.snapshot.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn highlights(&self) -> &[Square] {
        &self.highlights
    }

    pub fn input_mode(&self) -> InputMode {
        self.mode
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Fullmove number and mover of the first entry in [`history`](Self::history)
    pub fn first_move(&self) -> (u32, Color) {
        self.first_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.snapshot.castling
    }

    pub fn frozen(&self) -> &FrozenPieces {
        &self.snapshot.frozen
    }

    pub fn ghost_active(&self) -> Option<Color> {
        self.snapshot.ghost
    }

    pub fn spell_available(&self, color: Color, spell: Spell) -> bool {
        let enabled = match spell {
            Spell::Freeze => self.config.freeze_enabled,
            Spell::Ghost => self.config.ghost_enabled,
        };
        enabled && self.snapshot.spells.is_available(color, spell)
    }

    pub fn to_fen(&self) -> String {
        self.snapshot.to_fen()
    }

    pub fn is_check(&self, color: Color) -> bool {
        rules::is_check(&self.snapshot.board, color)
    }

    /// Legal destinations for the piece on `from` under the configured policy
    pub fn legal_moves_from(&self, from: Square) -> Vec<Square> {
        let Some(piece) = self.snapshot.board.get_piece(from) else {
            return Vec::new();
        };
        let opts = self.snapshot.move_options(piece.color);
        rules::legal_moves(
            &self.snapshot.board,
            from,
            &opts,
            self.config.legality_policy(),
        )
    }

    /// Every legal move for the side to move. Promotions are listed as queen promotions.
    pub fn legal_move_list(&self) -> Vec<Move> {
        let board = &self.snapshot.board;
        let mut moves = Vec::new();
        for (from, piece) in board.pieces_of(self.snapshot.turn) {
            for to in self.legal_moves_from(from) {
                let mut mv = rules::move_for(board, from, to);
                if piece.piece_type == PieceType::Pawn && to.row == piece.color.promotion_row() {
                    mv.promotion = Some(PieceType::Queen);
                }
                moves.push(mv);
            }
        }
        moves
    }

    /// Handle a click on `square` according to the selection protocol
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        if self.status.is_terminal() {
            return ClickOutcome::Ignored;
        }

        if self.mode == InputMode::FreezeTargeting {
            return match self.cast_freeze(square) {
                Ok(()) => ClickOutcome::Froze(square),
                Err(_) => ClickOutcome::Ignored,
            };
        }

        let own_piece = self
            .snapshot
            .board
            .get_piece(square)
            .is_some_and(|p| p.color == self.snapshot.turn);

        let current = self.selected;
        match current {
            Some(selected) if selected == square => {
                self.clear_selection();
                ClickOutcome::Deselected
            }
            Some(selected) if self.highlights.contains(&square) => {
                let mv = rules::move_for(&self.snapshot.board, selected, square);
                self.execute(mv);
                ClickOutcome::Moved(mv)
            }
            _ if own_piece => {
                self.select(square);
                ClickOutcome::Selected(square)
            }
            Some(_) => {
                self.clear_selection();
                ClickOutcome::Deselected
            }
            None => ClickOutcome::Ignored,
        }
    }

    /// Enter freeze targeting for the side to move
    pub fn activate_freeze(&mut self) -> GameResult<()> {
        self.check_spell(Spell::Freeze)?;
        debug!("{} is choosing a freeze target", self.snapshot.turn);
        self.clear_selection();
        self.mode = InputMode::FreezeTargeting;
        Ok(())
    }

    /// Leave freeze targeting without using the spell
    pub fn cancel_spell(&mut self) {
        self.mode = InputMode::Normal;
    }

    /// Freeze the piece on `target` for the configured duration. Does not end the turn.
    ///
    /// A freeze that would leave the caster without a legal move is refused.
    pub fn cast_freeze(&mut self, target: Square) -> GameResult<()> {
        self.check_spell(Spell::Freeze)?;
        let refuse = |reason: String| GameError::IllegalMove {
            mv: Move::new(target, target),
            reason,
        };
        if self.snapshot.board.is_empty(target) {
            return Err(refuse(format!("no piece on {} to freeze", target)));
        }

        let caster = self.snapshot.turn;
        let next = self.snapshot.apply(&Action::Freeze {
            target,
            half_moves: self.config.freeze_duration,
        });
        let opts = next.move_options(caster);
        if !rules::has_any_legal_move(&next.board, caster, &opts, self.config.legality_policy()) {
            return Err(refuse(format!(
                "freezing {} would leave {} without a legal move",
                target, caster
            )));
        }

        self.snapshot = next;
        self.mode = InputMode::Normal;
        debug!(
            "{} froze {} for {} half-moves",
            self.snapshot.turn, target, self.config.freeze_duration
        );
        Ok(())
    }

    /// Grant ghost mode to the side to move for its next move
    pub fn activate_ghost(&mut self) -> GameResult<()> {
        self.check_spell(Spell::Ghost)?;
        self.snapshot = self.snapshot.apply(&Action::Ghost);
        debug!("{} activated ghost walk", self.snapshot.turn);

        if let Some(selected) = self.selected {
            self.highlights = self.legal_moves_from(selected);
        }
        Ok(())
    }

    /// Play a move for the side to move, if it is legal. State is untouched on error.
    pub fn try_move(&mut self, mv: Move) -> GameResult<Move> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver(self.status));
        }

        let illegal = |reason: String| GameError::IllegalMove { mv, reason };

        let piece = self
            .snapshot
            .board
            .get_piece(mv.from)
            .ok_or_else(|| illegal(format!("no piece on {}", mv.from)))?;

        if piece.color != self.snapshot.turn {
            return Err(illegal(format!(
                "it is {}'s turn",
                self.snapshot.turn
            )));
        }
        if self.snapshot.frozen.is_frozen(mv.from) {
            return Err(illegal(format!("the piece on {} is frozen", mv.from)));
        }
        if !self.legal_moves_from(mv.from).contains(&mv.to) {
            return Err(illegal(format!(
                "{} on {} cannot reach {}",
                piece.piece_type, mv.from, mv.to
            )));
        }

        let mut actual = rules::move_for(&self.snapshot.board, mv.from, mv.to);
        if let Some(promotion) = mv.promotion {
            let promotes = piece.piece_type == PieceType::Pawn
                && mv.to.row == piece.color.promotion_row();
            if !promotes || !promotion.is_promotion_target() {
                return Err(illegal(format!("cannot promote to {}", promotion)));
            }
            actual.promotion = Some(promotion);
        }

        self.execute(actual);
        Ok(actual)
    }

    /// Apply a move computed by the external engine for `requested_fen`.
    ///
    /// A reply for a position other than the current one, or a move that is
    /// no longer legal, is rejected as stale and nothing changes.
    pub fn apply_engine_move(&mut self, requested_fen: &str, mv: Move) -> GameResult<Move> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver(self.status));
        }

        let current = self.to_fen();
        if requested_fen.trim() != current {
            return Err(GameError::StaleReply(format!(
                "reply for '{}' but the position is now '{}'",
                requested_fen, current
            )));
        }

        self.try_move(mv).map_err(|e| match e {
            GameError::IllegalMove { reason, .. } => {
                GameError::StaleReply(format!("{} is not playable: {}", mv, reason))
            }
            other => other,
        })
    }

    fn check_spell(&self, spell: Spell) -> GameResult<()> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver(self.status));
        }
        let color = self.snapshot.turn;
        if !self.spell_available(color, spell) {
            return Err(GameError::SpellUnavailable { spell, color });
        }
        Ok(())
    }

    fn select(&mut self, square: Square) {
        self.selected = Some(square);
        self.highlights = self.legal_moves_from(square);
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.highlights.clear();
    }

    fn execute(&mut self, mv: Move) {
        let mover = self.snapshot.turn;
        debug!("{} plays {}", mover, mv);

        self.snapshot = self.snapshot.apply(&Action::Move(mv));
        trace!("Board after {}:\n{}", mv, self.snapshot.board.to_ascii());
        self.history.push(mv);
        self.clear_selection();
        self.mode = InputMode::Normal;

        self.update_status(mover);
    }

    fn update_status(&mut self, mover: Color) {
        let opponent = mover.opposite();
        let board = &self.snapshot.board;
        let opts = self.snapshot.move_options(opponent);
        let policy = self.config.legality_policy();

        // A missing king ends the game under either win condition.
        // Check with no way out is mate whatever the win condition.
        let (status, winner) = if board.find_king(opponent).is_none() {
            (GameStatus::KingCaptured, Some(mover))
        } else if self.config.win_condition == WinCondition::Checkmate
            && rules::is_checkmate_with(board, opponent, &opts)
        {
            (GameStatus::Checkmate, Some(mover))
        } else if rules::is_check(board, opponent)
            && !rules::has_any_legal_move(board, opponent, &opts, policy)
        {
            (GameStatus::Checkmate, Some(mover))
        } else if rules::is_stalemate_with(board, opponent, &opts, policy) {
            (GameStatus::Stalemate, None)
        } else if self.snapshot.halfmove_clock >= FIFTY_MOVE_LIMIT {
            (GameStatus::Draw, None)
        } else {
            (GameStatus::Playing, None)
        };

        if status.is_terminal() {
            match winner {
                Some(color) => info!("Game over: {} ({} wins)", status, color),
                None => info!("Game over: {}", status),
            }
        }
        self.status = status;
        self.winner = winner;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
