use crate::chess::{Color, Square};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Default freeze length in half-moves (two full turns)
pub const DEFAULT_FREEZE_DURATION: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spell {
    Freeze,
    Ghost,
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spell::Freeze => write!(f, "Freeze"),
            Spell::Ghost => write!(f, "Ghost Walk"),
        }
    }
}

/// Which one-shot spells each color still holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellAvailability {
    white: [bool; 2],
    black: [bool; 2],
}

impl SpellAvailability {
    /// Both spells available to both colors
    pub fn new() -> Self {
        Self {
            white: [true; 2],
            black: [true; 2],
        }
    }

    fn index(spell: Spell) -> usize {
        match spell {
            Spell::Freeze => 0,
            Spell::Ghost => 1,
        }
    }

    pub fn is_available(&self, color: Color, spell: Spell) -> bool {
        match color {
            Color::White => self.white[Self::index(spell)],
            Color::Black => self.black[Self::index(spell)],
        }
    }

    /// Mark a spell as used. Availability never comes back within a game.
    pub fn consume(&mut self, color: Color, spell: Spell) {
        match color {
            Color::White => self.white[Self::index(spell)] = false,
            Color::Black => self.black[Self::index(spell)] = false,
        }
    }
}

impl Default for SpellAvailability {
    fn default() -> Self {
        Self::new()
    }
}

/// Remaining freeze time per square, in half-moves. Only positive counts are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrozenPieces {
    timers: HashMap<Square, u8>,
}

impl FrozenPieces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn freeze(&mut self, square: Square, half_moves: u8) {
        if half_moves > 0 {
            self.timers.insert(square, half_moves);
        }
    }

    pub fn is_frozen(&self, square: Square) -> bool {
        self.remaining(square) > 0
    }

    pub fn remaining(&self, square: Square) -> u8 {
        self.timers.get(&square).copied().unwrap_or(0)
    }

    /// Drop the timer on a square, e.g. when the frozen piece is captured
    pub fn release(&mut self, square: Square) {
        self.timers.remove(&square);
    }

    /// One half-move has elapsed: decrement all timers and drop expired ones
    pub fn tick(&mut self) {
        self.timers.retain(|_, remaining| {
            *remaining -= 1;
            *remaining > 0
        });
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Frozen squares in board order
    pub fn iter(&self) -> impl Iterator<Item = (Square, u8)> + '_ {
        let mut entries: Vec<(Square, u8)> = self.timers.iter().map(|(s, r)| (*s, *r)).collect();
        entries.sort();
        entries.into_iter()
    }
}
