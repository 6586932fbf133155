use super::spells::DEFAULT_FREEZE_DURATION;
use crate::rules::LegalityPolicy;
use serde::{Deserialize, Serialize};

/// How a game is won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WinCondition {
    /// Standard chess: the side left in check with no legal move loses
    Checkmate,
    /// The game ends as soon as a king leaves the board
    KingCapture,
}

/// Rule variant switches threaded through move generation and the game state machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub ghost_enabled: bool,
    pub freeze_enabled: bool,
    /// Filter out moves that leave the mover's own king in check
    pub self_check_filtering: bool,
    pub win_condition: WinCondition,
    /// Half-moves a frozen piece stays frozen
    pub freeze_duration: u8,
}

impl GameConfig {
    /// Plain chess: no spells, standard legality, checkmate ends the game
    pub fn classic() -> Self {
        Self {
            ghost_enabled: false,
            freeze_enabled: false,
            self_check_filtering: true,
            win_condition: WinCondition::Checkmate,
            freeze_duration: DEFAULT_FREEZE_DURATION,
        }
    }

    /// Spell Chess: both spells, kings may be left en prise and captured
    pub fn spell_chess() -> Self {
        Self {
            ghost_enabled: true,
            freeze_enabled: true,
            self_check_filtering: false,
            win_condition: WinCondition::KingCapture,
            freeze_duration: DEFAULT_FREEZE_DURATION,
        }
    }

    pub fn legality_policy(&self) -> LegalityPolicy {
        if self.self_check_filtering {
            LegalityPolicy::Standard
        } else {
            LegalityPolicy::Permissive
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::spell_chess()
    }
}
