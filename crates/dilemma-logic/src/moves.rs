//! The two moves of the dilemma

use core::fmt;
use serde::{Deserialize, Serialize};

/// A single, irrevocable choice in the encounter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Betray,
    Cooperate,
}

impl Move {
    /// Both moves in canonical order
    pub const ALL: [Move; 2] = [Move::Betray, Move::Cooperate];

    /// Row/column index into a payoff table
    pub(crate) const fn index(self) -> usize {
        match self {
            Move::Betray => 0,
            Move::Cooperate => 1,
        }
    }

    pub fn opposite(self) -> Move {
        match self {
            Move::Betray => Move::Cooperate,
            Move::Cooperate => Move::Betray,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Betray => write!(f, "betray"),
            Move::Cooperate => write!(f, "cooperate"),
        }
    }
}
