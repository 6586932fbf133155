pub mod config;
pub mod error;
pub mod spells;
pub mod state;

pub use config::{GameConfig, WinCondition};
pub use error::{GameError, GameResult};
pub use spells::{FrozenPieces, Spell, SpellAvailability, DEFAULT_FREEZE_DURATION};
pub use state::{Action, ClickOutcome, GameState, GameStatus, InputMode, Snapshot};
