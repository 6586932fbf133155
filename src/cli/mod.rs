pub mod app;
pub mod commands;
pub mod display;
pub mod session;

pub use app::{Config, EngineConfig};
pub use commands::{Cli, Commands, ConfigCommand};
pub use display::{render_board, render_history, render_moves_json, render_status};
pub use session::{Input, Session};
