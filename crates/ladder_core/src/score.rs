//! Match scores and the first-to-N legality rule.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LadderError, Result};

/// Sets needed to win a match by default (best of 7)
pub const DEFAULT_SETS_TO_WIN: u8 = 4;

/// Final set count of a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub challenger: u8,
    pub defender: u8,
}

impl Score {
    pub fn new(challenger: u8, defender: u8) -> Self {
        Self {
            challenger,
            defender,
        }
    }

    pub fn total(&self) -> u32 {
        self.challenger as u32 + self.defender as u32
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.challenger, self.defender)
    }
}

/// Which side of a challenge took the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Challenger,
    Defender,
}

/// Match format: first side to `sets_to_win` sets takes the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRules {
    pub sets_to_win: u8,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            sets_to_win: DEFAULT_SETS_TO_WIN,
        }
    }
}

impl ScoreRules {
    /// Longest possible match in sets
    pub fn max_sets(&self) -> u32 {
        (2 * self.sets_to_win as u32).saturating_sub(1)
    }

    /// Check a score pair and return the winning side.
    ///
    /// Legal iff exactly one side sits at `sets_to_win` and the total lies in
    /// `sets_to_win..=max_sets`. With the default rules that is
    /// `4 <= cs + ds <= 7` and `cs == 4 || ds == 4`.
    pub fn winner(&self, score: Score) -> Result<Side> {
        let target = self.sets_to_win;
        let total = score.total();
        let in_range = total >= target as u32 && total <= self.max_sets();

        match (score.challenger == target, score.defender == target) {
            (true, false) if in_range => Ok(Side::Challenger),
            (false, true) if in_range => Ok(Side::Defender),
            _ => Err(LadderError::InvalidScore {
                challenger: score.challenger,
                defender: score.defender,
                sets_to_win: target,
            }),
        }
    }

    pub fn is_valid(&self, score: Score) -> bool {
        self.winner(score).is_ok()
    }
}

#[cfg(test)]
#[path = "score_tests.rs"]
mod score_tests;
