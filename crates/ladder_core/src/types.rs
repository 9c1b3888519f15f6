//! Small shared types: round numbers, ranks and team seats.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based position on the ladder. Rank 1 is the top of the ladder.
pub type Rank = u32;

/// Round number. Rounds are numbered from the tournament's first round upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Round(pub u32);

impl Round {
    /// The round that follows this one
    pub fn next(self) -> Round {
        Round(self.0 + 1)
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A team together with the rank it held when a challenge was scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub team: String,
    pub rank: Rank,
}

impl Seat {
    pub fn new(team: impl Into<String>, rank: Rank) -> Self {
        Self {
            team: team.into(),
            rank,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}位)", self.team, self.rank)
    }
}
