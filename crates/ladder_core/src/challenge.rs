//! Challenge generation: the matches each division plays in a round.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::division::{division_name, Division};
use crate::score::Score;
use crate::types::{Rank, Round, Seat};

/// A single scheduled match.
///
/// The higher-ranked team (numerically smaller rank) always defends.
/// `score` is unset until the result is entered, and is set exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub round: Round,
    /// Sequence code, unique within the round, starting at 1
    pub code: u32,
    /// Index of the division the match belongs to
    pub division: usize,
    pub challenger: Seat,
    pub defender: Seat,
    pub score: Option<Score>,
}

impl Challenge {
    /// Document key, e.g. `3-7` for round 3, code 7
    pub fn key(&self) -> String {
        format!("{}-{}", self.round, self.code)
    }

    pub fn division_name(&self) -> String {
        division_name(self.division)
    }

    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}

/// Rank pairings a division plays, as (defender, challenger) offsets into the
/// division. Order here fixes the order of sequence codes.
fn pairings(size: usize) -> &'static [(usize, usize)] {
    if size == 2 {
        &[(0, 1)]
    } else {
        // assign_divisions only produces sizes 2 and 3
        &[(0, 1), (0, 2), (1, 2)]
    }
}

/// (defender rank, challenger rank) pairs a division is expected to play
pub fn expected_pairings(division: &Division) -> Vec<(Rank, Rank)> {
    pairings(division.size())
        .iter()
        .map(|&(d, c)| {
            (
                division.first_rank() + d as Rank,
                division.first_rank() + c as Rank,
            )
        })
        .collect()
}

/// Generate the unscored challenges for a round.
///
/// Divisions are processed in the order given (rank order as produced by
/// [`assign_divisions`](crate::assign_divisions)); codes are handed out
/// sequentially from 1, so identical inputs always give identical codes.
/// A 2-team division plays once, a 3-team division plays a full round robin.
pub fn generate_challenges(round: Round, divisions: &[Division]) -> Vec<Challenge> {
    let mut challenges = Vec::new();
    let mut code = 1;

    for division in divisions {
        let teams = division.teams();
        for &(d, c) in pairings(division.size()) {
            let challenge = Challenge {
                round,
                code,
                division: division.index(),
                challenger: Seat::new(&teams[c], division.first_rank() + c as Rank),
                defender: Seat::new(&teams[d], division.first_rank() + d as Rank),
                score: None,
            };
            debug!(
                key = %challenge.key(),
                division = %division.name(),
                challenger = %challenge.challenger,
                defender = %challenge.defender,
                "generated challenge"
            );
            challenges.push(challenge);
            code += 1;
        }
    }

    info!(round = %round, matches = challenges.len(), "generated challenges");
    challenges
}

#[cfg(test)]
#[path = "challenge_tests.rs"]
mod challenge_tests;
