use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spellchess")]
#[command(about = "Spell Chess: chess with Freeze and Ghost Walk spells")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a game in the terminal
    ///
    /// Enter squares to select and move (e4), full moves (e2e4, e7e8n),
    /// or spell commands (freeze, ghost). Type 'help' during the game.
    ///
    /// Examples:
    ///   spellchess play
    ///   spellchess play --classic
    ///   spellchess play --engine /usr/bin/stockfish --engine-color black --depth 8
    Play {
        /// Standard chess rules: no spells, checkmate wins
        #[arg(long)]
        classic: bool,
        /// Path to a UCI engine binary to play against
        #[arg(long)]
        engine: Option<PathBuf>,
        /// Color the engine plays: 'white' or 'black'
        #[arg(long)]
        engine_color: Option<String>,
        /// Engine search depth (1-15)
        #[arg(long)]
        depth: Option<u8>,
        /// Start from this FEN instead of the initial position
        #[arg(long)]
        fen: Option<String>,
    },

    /// List the legal destinations of the piece on a square
    ///
    /// Example: spellchess moves "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1" e1
    Moves {
        /// Position in FEN
        fen: String,
        /// Square of the piece, e.g. e2
        square: String,
        /// Generate with ghost mode active
        #[arg(long)]
        ghost: bool,
        /// Do not filter moves that leave the king in check
        #[arg(long)]
        permissive: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the board for a FEN position
    Show {
        /// Position in FEN
        fen: String,
    },

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the active configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
}
