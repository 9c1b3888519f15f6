//! Per-round record and its lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::challenge::Challenge;
use crate::ranking::RoundResult;
use crate::types::Round;

/// Where a round stands.
///
/// `Scheduled → InProgress → Complete → RankingPublished`. Publication needs
/// `Complete`; a published round never goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Challenges generated, no scores yet
    Scheduled,
    /// Some scores entered
    InProgress,
    /// Every challenge scored
    Complete,
    /// Next round's rank list exists
    RankingPublished,
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundPhase::Scheduled => "scheduled",
            RoundPhase::InProgress => "in progress",
            RoundPhase::Complete => "complete",
            RoundPhase::RankingPublished => "published",
        };
        f.write_str(name)
    }
}

/// Challenges of a round and, once published, what the round produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: Round,
    /// In code order
    pub challenges: Vec<Challenge>,
    pub result: Option<RoundResult>,
}

impl RoundRecord {
    pub fn new(round: Round, challenges: Vec<Challenge>) -> Self {
        Self {
            round,
            challenges,
            result: None,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        if self.result.is_some() {
            return RoundPhase::RankingPublished;
        }
        match self.scored() {
            0 => RoundPhase::Scheduled,
            n if n == self.challenges.len() => RoundPhase::Complete,
            _ => RoundPhase::InProgress,
        }
    }

    /// Number of challenges with a score
    pub fn scored(&self) -> usize {
        self.challenges.iter().filter(|c| c.is_scored()).count()
    }

    pub fn challenge(&self, code: u32) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.code == code)
    }

    pub fn challenge_mut(&mut self, code: u32) -> Option<&mut Challenge> {
        self.challenges.iter_mut().find(|c| c.code == code)
    }

    /// Challenges still waiting for a score, in code order
    pub fn pending(&self) -> impl Iterator<Item = &Challenge> {
        self.challenges.iter().filter(|c| !c.is_scored())
    }
}
