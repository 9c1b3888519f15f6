//! Division bracketing: splitting a rank list into groups of 2 or 3.
//!
//! Divisions are filled front to back with 3 teams each. When the team count
//! is not a multiple of 3, the [`RemainderPolicy`] decides which boundary
//! divisions shrink to 2 teams. The same policy must be used when a round is
//! scheduled and when its ranking is computed, otherwise the challenges and
//! the divisions they are checked against will not line up.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::debug;

use crate::error::{LadderError, Result};
use crate::rank_list::RankList;
use crate::types::Rank;

/// Labels for divisions, from the top of the ladder down.
pub const DIVISION_NAMES: [&str; 23] = [
    "X", "S+ Upper", "S+ Lower", "S Upper", "S Lower", "A+ Upper", "A+ Lower", "A Upper",
    "A Lower", "A- Upper", "A- Lower", "B+ Upper", "B+ Lower", "B Upper", "B Lower", "B- Upper",
    "B- Lower", "C+ Upper", "C+ Lower", "C Upper", "C Lower", "C- Upper", "C- Lower",
];

/// Label of the division at `index` (0 = top division)
pub fn division_name(index: usize) -> String {
    match DIVISION_NAMES.get(index) {
        Some(name) => name.to_string(),
        None => format!("Division {}", index + 1),
    }
}

/// Which boundary divisions hold only 2 teams when `N mod 3 != 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// `N mod 3 == 2`: the top division has 2.
    /// `N mod 3 == 1`: the top and bottom divisions have 2.
    #[default]
    ShrinkTop,
    /// `N mod 3 == 2`: the bottom division has 2.
    /// `N mod 3 == 1`: the top and bottom divisions have 2.
    ShrinkBottom,
}

impl RemainderPolicy {
    /// Division sizes, top to bottom, for `n` teams.
    pub fn sizes(self, n: usize) -> Result<Vec<usize>> {
        if n < 2 {
            return Err(LadderError::MalformedRankList(format!(
                "{} team(s) cannot form a division, at least 2 are needed",
                n
            )));
        }

        let sizes = match (n % 3, self) {
            (0, _) => vec![3; n / 3],
            (2, RemainderPolicy::ShrinkTop) => {
                let mut sizes = vec![2];
                sizes.extend(vec![3; n / 3]);
                sizes
            }
            (2, RemainderPolicy::ShrinkBottom) => {
                let mut sizes = vec![3; n / 3];
                sizes.push(2);
                sizes
            }
            // n = 3k + 1 with k >= 1: 2 + 3(k - 1) + 2
            _ => {
                let mut sizes = vec![2];
                sizes.extend(vec![3; n / 3 - 1]);
                sizes.push(2);
                sizes
            }
        };
        Ok(sizes)
    }
}

/// A contiguous slice of the rank list that plays within itself for a round.
///
/// Only [`assign_divisions`] builds divisions, so every division holds 2 or 3
/// teams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
    index: usize,
    first_rank: Rank,
    teams: Vec<String>,
}

impl Division {
    /// Position from the top, 0 = top division
    pub fn index(&self) -> usize {
        self.index
    }

    /// Rank of the first (highest) member
    pub fn first_rank(&self) -> Rank {
        self.first_rank
    }

    /// Members in rank order
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn name(&self) -> String {
        division_name(self.index)
    }

    pub fn size(&self) -> usize {
        self.teams.len()
    }

    pub fn last_rank(&self) -> Rank {
        self.first_rank + self.teams.len() as Rank - 1
    }

    pub fn ranks(&self) -> RangeInclusive<Rank> {
        self.first_rank..=self.last_rank()
    }

    /// Members paired with their ranks
    pub fn members(&self) -> impl Iterator<Item = (Rank, &str)> {
        self.teams
            .iter()
            .enumerate()
            .map(move |(i, t)| (self.first_rank + i as Rank, t.as_str()))
    }
}

/// Split a rank list into divisions according to `policy`.
///
/// Every rank is covered exactly once and divisions come out in rank order.
pub fn assign_divisions(rank_list: &RankList, policy: RemainderPolicy) -> Result<Vec<Division>> {
    let sizes = policy.sizes(rank_list.len())?;
    let teams = rank_list.teams();

    let mut divisions = Vec::with_capacity(sizes.len());
    let mut start = 0;
    for (index, size) in sizes.into_iter().enumerate() {
        let division = Division {
            index,
            first_rank: start as Rank + 1,
            teams: teams[start..start + size].to_vec(),
        };
        debug!(
            division = %division.name(),
            ranks = ?division.ranks(),
            "assigned division"
        );
        divisions.push(division);
        start += size;
    }

    Ok(divisions)
}

#[cfg(test)]
#[path = "division_tests.rs"]
mod division_tests;
