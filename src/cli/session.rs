use super::display::{render_board, render_history, render_status};
use crate::chess::{Color, Move, Square};
use crate::engine::{Score, SearchReply, SearchRequest, UciEngine};
use crate::game::{ClickOutcome, GameState};
use anyhow::Result;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

const HELP: &str = "\
Commands:
  e2          select a piece / choose a target (like clicking a square)
  e2e4        play a move directly (e7e8n to under-promote)
  freeze      cast Freeze; then enter the square to freeze
  freeze d5   cast Freeze on d5 immediately
  ghost       cast Ghost Walk for your next move
  cancel      leave freeze targeting
  board       redraw the board
  fen         print the position in FEN
  history     list the moves played
  reset       start a new game
  quit        leave";

/// A parsed line of terminal input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Click(Square),
    Move(Move),
    Freeze(Option<Square>),
    Ghost,
    Cancel,
    Board,
    Fen,
    History,
    Reset,
    Help,
    Quit,
}

impl FromStr for Input {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let mut words = s.split_whitespace();
        let Some(first) = words.next() else {
            return Err("Empty input. Type 'help' for commands.".to_string());
        };
        let rest = words.next();

        match (first, rest) {
            ("freeze", None) => Ok(Input::Freeze(None)),
            ("freeze", Some(target)) => Square::from_str(target)
                .map(|sq| Input::Freeze(Some(sq)))
                .map_err(|e| e.to_string()),
            ("ghost", None) => Ok(Input::Ghost),
            ("cancel", None) => Ok(Input::Cancel),
            ("board", None) => Ok(Input::Board),
            ("fen", None) => Ok(Input::Fen),
            ("history", None) => Ok(Input::History),
            ("reset", None) => Ok(Input::Reset),
            ("help", None) | ("?", None) => Ok(Input::Help),
            ("quit", None) | ("exit", None) => Ok(Input::Quit),
            (token, None) if token.len() == 2 => {
                Square::from_str(token).map(Input::Click).map_err(|e| e.to_string())
            }
            (token, None) => Move::from_str(token).map(Input::Move).map_err(|e| e.to_string()),
            _ => Err(format!("Unrecognized input '{}'. Type 'help'.", s)),
        }
    }
}

/// Terminal game loop, optionally with an engine opponent
pub struct Session {
    game: GameState,
    engine: Option<UciEngine>,
    engine_color: Color,
    depth: u8,
    max_failures: u32,
    failures: u32,
    /// Latest engine evaluation, from White's side
    evaluation: Option<Score>,
}

impl Session {
    pub fn new(game: GameState) -> Self {
        Self {
            game,
            engine: None,
            engine_color: Color::Black,
            depth: crate::engine::DEFAULT_SEARCH_DEPTH,
            max_failures: 3,
            failures: 0,
            evaluation: None,
        }
    }

    pub fn with_engine(
        mut self,
        engine: UciEngine,
        engine_color: Color,
        depth: u8,
        max_failures: u32,
    ) -> Self {
        self.engine = Some(engine);
        self.engine_color = engine_color;
        self.depth = depth;
        self.max_failures = max_failures.max(1);
        self
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn evaluation(&self) -> Option<Score> {
        self.evaluation
    }

    /// Search request for the current position, limited to the side to move's legal moves
    pub fn engine_request(&self) -> SearchRequest {
        SearchRequest::new(self.game.to_fen(), self.depth)
            .with_search_moves(self.game.legal_move_list())
    }

    /// Record the reply's evaluation and play its move
    pub fn apply_engine_reply(&mut self, reply: SearchReply) -> Result<Move, String> {
        if let Some(score) = reply.score {
            let score = score.for_white(self.game.turn());
            debug!("Engine evaluation {}", score);
            self.evaluation = Some(score);
        }
        self.game
            .apply_engine_move(&reply.fen, reply.best_move)
            .map_err(|e| e.to_string())
    }

    /// Apply one input. Returns the text to show and whether to keep going.
    pub fn handle_input(&mut self, input: Input) -> (String, bool) {
        let message = match input {
            Input::Quit => return ("Goodbye.".to_string(), false),
            Input::Help => HELP.to_string(),
            Input::Board => self.render(),
            Input::Fen => self.game.to_fen(),
            Input::History => render_history(&self.game),
            Input::Reset => {
                self.game.reset();
                self.failures = 0;
                self.evaluation = None;
                self.render()
            }
            Input::Cancel => {
                self.game.cancel_spell();
                self.render()
            }
            Input::Ghost => match self.game.activate_ghost() {
                Ok(()) => self.render(),
                Err(e) => e.to_string(),
            },
            Input::Freeze(None) => match self.game.activate_freeze() {
                Ok(()) => self.render(),
                Err(e) => e.to_string(),
            },
            Input::Freeze(Some(target)) => match self.game.cast_freeze(target) {
                Ok(()) => self.render(),
                Err(e) => e.to_string(),
            },
            Input::Move(mv) => match self.game.try_move(mv) {
                Ok(_) => self.render(),
                Err(e) => e.to_string(),
            },
            Input::Click(square) => match self.game.click(square) {
                ClickOutcome::Ignored => format!("Nothing to do on {}.", square),
                _ => self.render(),
            },
        };
        (message, true)
    }

    fn render(&self) -> String {
        let mut text = format!("{}\n{}", render_board(&self.game), render_status(&self.game));
        if let Some(score) = self.evaluation {
            text.push_str(&format!("\nEvaluation (White): {}", score));
        }
        text
    }

    fn engine_to_move(&self) -> bool {
        self.engine.is_some()
            && !self.game.status().is_terminal()
            && self.game.turn() == self.engine_color
    }

    /// Ask the engine for a move and play it. Failures count toward switching the engine off.
    async fn play_engine_turn(&mut self) {
        let request = self.engine_request();
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let result = engine.search(&request).await;
        let outcome = match result {
            Ok(reply) => self.apply_engine_reply(reply),
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok(mv) => {
                self.failures = 0;
                println!("Engine plays {}", mv);
                println!("{}", self.render());
            }
            Err(reason) => {
                self.failures += 1;
                warn!("Engine turn failed ({}/{}): {}", self.failures, self.max_failures, reason);
                if self.failures >= self.max_failures {
                    println!("The engine failed {} times in a row and has been switched off.", self.failures);
                    println!("You now play both sides.");
                    if let Some(engine) = self.engine.take() {
                        engine.quit().await;
                    }
                }
            }
        }
    }

    /// Run until the user quits or stdin closes
    pub async fn run(mut self) -> Result<()> {
        println!("{}", self.render());
        println!("Type 'help' for commands.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            while self.engine_to_move() {
                self.play_engine_turn().await;
            }

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let (message, keep_going) = match line.parse::<Input>() {
                Ok(input) => self.handle_input(input),
                Err(e) => (e, true),
            };
            println!("{}", message);
            if !keep_going {
                break;
            }
        }

        if let Some(engine) = self.engine.take() {
            engine.quit().await;
        }
        Ok(())
    }
}
