mod common;

use common::*;
use spellchess::chess::Color;
use spellchess::cli::{
    render_board, render_history, render_moves_json, render_status, Input, Session,
};
use spellchess::engine::{Score, SearchReply};
use spellchess::game::{GameConfig, GameState, GameStatus, Spell};

#[cfg(test)]
mod input_parsing_tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("e4".parse::<Input>().unwrap(), Input::Click(sq("e4")));
        assert_eq!("E2E4".parse::<Input>().unwrap(), Input::Move(mv("e2e4")));
        assert_eq!("e7e8n".parse::<Input>().unwrap(), Input::Move(mv("e7e8n")));
        assert_eq!("freeze".parse::<Input>().unwrap(), Input::Freeze(None));
        assert_eq!(
            "freeze d5".parse::<Input>().unwrap(),
            Input::Freeze(Some(sq("d5")))
        );
        assert_eq!(" ghost ".parse::<Input>().unwrap(), Input::Ghost);
        assert_eq!("cancel".parse::<Input>().unwrap(), Input::Cancel);
        assert_eq!("?".parse::<Input>().unwrap(), Input::Help);
        assert_eq!("exit".parse::<Input>().unwrap(), Input::Quit);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["", "zz", "e9", "freeze x9", "ghost now", "hello"] {
            assert!(text.parse::<Input>().is_err(), "'{}' should be rejected", text);
        }
    }
}

#[cfg(test)]
mod session_tests {
    use super::*;

    #[test]
    fn test_quit_stops_the_loop() {
        let mut session = Session::new(GameState::default());
        let (_, keep_going) = session.handle_input(Input::Quit);
        assert!(!keep_going);
    }

    #[test]
    fn test_moves_and_clicks() {
        let mut session = Session::new(GameState::new(GameConfig::classic()));

        let (_, keep_going) = session.handle_input(Input::Move(mv("e2e4")));
        assert!(keep_going);
        assert_eq!(session.game().turn(), Color::Black);

        let (message, _) = session.handle_input(Input::Move(mv("e2e4")));
        assert!(message.contains("Illegal move"), "got: {}", message);

        session.handle_input(Input::Click(sq("e7")));
        session.handle_input(Input::Click(sq("e5")));
        assert_eq!(session.game().history().len(), 2);

        let (fen, _) = session.handle_input(Input::Fen);
        assert_eq!(fen, session.game().to_fen());

        let (history, _) = session.handle_input(Input::History);
        assert_eq!(history, "1. e2e4 e7e5");
    }

    #[test]
    fn test_spell_commands() {
        let mut session = Session::new(GameState::new(GameConfig::spell_chess()));

        session.handle_input(Input::Freeze(Some(sq("d7"))));
        assert!(session.game().frozen().is_frozen(sq("d7")));
        assert!(!session.game().spell_available(Color::White, Spell::Freeze));

        let (message, _) = session.handle_input(Input::Freeze(None));
        assert!(message.contains("not available"), "got: {}", message);

        session.handle_input(Input::Ghost);
        assert_eq!(session.game().ghost_active(), Some(Color::White));

        session.handle_input(Input::Reset);
        assert_eq!(session.game().status(), GameStatus::Playing);
        assert!(session.game().frozen().is_empty());
        assert_eq!(session.game().ghost_active(), None);
    }

    #[test]
    fn test_engine_evaluation_is_shown_from_whites_side() {
        let mut session = Session::new(GameState::new(GameConfig::classic()));
        let (board, _) = session.handle_input(Input::Board);
        assert!(!board.contains("Evaluation"));

        session.handle_input(Input::Move(mv("e2e4")));
        let reply = SearchReply {
            fen: session.game().to_fen(),
            best_move: mv("e7e5"),
            score: Some(Score::Centipawns(-30)),
        };
        session.apply_engine_reply(reply).unwrap();
        assert_eq!(session.evaluation(), Some(Score::Centipawns(30)));

        // Still shown on the player's turn
        let (board, _) = session.handle_input(Input::Board);
        assert!(board.contains("Evaluation (White): +0.30"), "got: {}", board);

        session.handle_input(Input::Reset);
        assert_eq!(session.evaluation(), None);
    }
}

#[cfg(test)]
mod display_tests {
    use super::*;

    #[test]
    fn test_board_marks_selection_targets_and_frozen_pieces() {
        let mut game = GameState::new(GameConfig::spell_chess());
        game.cast_freeze(sq("g8")).unwrap();
        game.click(sq("e2"));

        let text = render_board(&game);
        assert!(text.contains("[P]"));
        assert!(text.contains("(.)"));
        assert!(text.contains("{n}"));
        assert!(text.starts_with("    a  b  c  d  e  f  g  h"));
    }

    #[test]
    fn test_status_lines() {
        let mut game = GameState::new(GameConfig::spell_chess());
        let status = render_status(&game);
        assert!(status.starts_with("White to move"));
        assert!(status.contains("Freeze, Ghost Walk"));

        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(render_status(&game).contains("(check)"));
        assert_eq!(render_history(&game), "1. f2f3 e7e5\n2. g2g4 d8h4");
    }

    #[test]
    fn test_history_continues_from_loaded_position() {
        let mut game = game_from(
            GameConfig::classic(),
            "4k3/8/8/8/8/8/8/R3K3 b - - 4 30",
        );
        play(&mut game, &["e8d7", "a1a7", "d7c6"]);
        assert_eq!(render_history(&game), "30... e8d7\n31. a1a7 d7c6");

        let mut game = game_from(GameConfig::classic(), "4k3/8/8/8/8/8/8/R3K3 w - - 0 12");
        play(&mut game, &["a1a2"]);
        assert_eq!(render_history(&game), "12. a1a2");
    }

    #[test]
    fn test_moves_json() {
        let json = render_moves_json(sq("e2"), &[sq("e3"), sq("e4")]).unwrap();
        assert_eq!(json, r#"{"from":"e2","targets":["e3","e4"]}"#);
    }

    #[test]
    fn test_status_after_game_over() {
        let mut game = GameState::new(GameConfig::classic());
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(render_status(&game).contains("Game over: checkmate. Black wins."));
    }
}
