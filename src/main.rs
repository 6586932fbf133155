use anyhow::{Context, Result};
use clap::Parser;
use spellchess::chess::{Color, Position, Square};
use spellchess::cli::{
    render_board, render_moves_json, render_status, Cli, Commands, Config, ConfigCommand, Session,
};
use spellchess::engine::{clamp_depth, UciEngine};
use spellchess::game::{GameConfig, GameState};
use spellchess::rules::{self, LegalityPolicy, MoveOptions};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            classic,
            engine,
            engine_color,
            depth,
            fen,
        } => {
            let config = Config::load_or_create_default().context("Failed to load configuration")?;
            let rules = if classic {
                GameConfig::classic()
            } else {
                config.rules.clone()
            };

            let game = match fen {
                Some(fen) => GameState::from_position(rules, Position::from_fen(&fen)?),
                None => GameState::new(rules),
            };

            let mut session = Session::new(game);

            if let Some(path) = engine.or_else(|| config.engine.path.clone()) {
                let color = match engine_color {
                    Some(c) => c.parse::<Color>()?,
                    None => config.engine.color,
                };
                let depth = depth.map_or(config.engine.depth(), clamp_depth);

                match UciEngine::spawn(&path, config.engine.timeout()).await {
                    Ok(uci) => {
                        info!("Engine ready, playing {} at depth {}", color, depth);
                        session = session.with_engine(uci, color, depth, config.engine.max_failures);
                    }
                    Err(e) => {
                        error!("Could not start engine {}: {}", path.display(), e);
                        println!("Engine unavailable ({}). Playing without it.", e);
                    }
                }
            }

            session.run().await?;
        }
        Commands::Moves {
            fen,
            square,
            ghost,
            permissive,
            json,
        } => {
            let position = Position::from_fen(&fen)?;
            let from: Square = square.parse()?;
            let policy = if permissive {
                LegalityPolicy::Permissive
            } else {
                LegalityPolicy::Standard
            };
            let opts = MoveOptions::basic()
                .with_castling(position.castling)
                .with_ghost(ghost);

            let targets = rules::legal_moves(&position.board, from, &opts, policy);
            if json {
                println!("{}", render_moves_json(from, &targets)?);
            } else if targets.is_empty() {
                println!("No legal moves from {}", from);
            } else {
                let names: Vec<String> = targets.iter().map(|sq| sq.to_string()).collect();
                println!("{}", names.join(" "));
            }
        }
        Commands::Show { fen } => {
            let position = Position::from_fen(&fen)?;
            let game = GameState::from_position(GameConfig::classic(), position);
            println!("{}", render_board(&game));
            println!("{}", render_status(&game));
        }
        Commands::Config { command } => match command {
            ConfigCommand::Show => {
                let config = Config::load_or_create_default()?;
                print!("{}", config.to_toml()?);
            }
            ConfigCommand::Path => {
                let path = Config::default_config_file()?;
                println!("{}", path.display());
            }
        },
    }

    Ok(())
}
