//! The ranking in force for one round.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::{LadderError, Result};
use crate::types::{Rank, Round};

/// Ordered teams for a round. Index 0 holds rank 1.
///
/// A rank list is always dense (ranks 1..=N) and never names a team twice;
/// both are checked on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRankList")]
pub struct RankList {
    round: Round,
    teams: Vec<String>,
}

/// Rank list as read from storage, before validation
#[derive(Deserialize)]
struct RawRankList {
    round: Round,
    teams: Vec<String>,
}

impl TryFrom<RawRankList> for RankList {
    type Error = LadderError;

    fn try_from(raw: RawRankList) -> Result<Self> {
        Self::new(raw.round, raw.teams)
    }
}

impl RankList {
    /// Build a rank list from teams already in rank order.
    pub fn new(round: Round, teams: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::new();
        for team in &teams {
            if !seen.insert(team.as_str()) {
                return Err(LadderError::MalformedRankList(format!(
                    "team {} appears more than once",
                    team
                )));
            }
        }
        Ok(Self { round, teams })
    }

    /// Build a rank list from explicit (rank, team) entries in any order.
    ///
    /// Fails on duplicate ranks, on ranks outside 1..=N and on gaps.
    pub fn from_ranks<I, S>(round: Round, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Rank, S)>,
        S: Into<String>,
    {
        let mut by_rank: BTreeMap<Rank, String> = BTreeMap::new();
        for (rank, team) in entries {
            if by_rank.insert(rank, team.into()).is_some() {
                return Err(LadderError::MalformedRankList(format!(
                    "rank {} is assigned twice",
                    rank
                )));
            }
        }

        for (expected, rank) in (1..).zip(by_rank.keys()) {
            if *rank != expected {
                return Err(LadderError::MalformedRankList(format!(
                    "rank {} is missing",
                    expected
                )));
            }
        }

        Self::new(round, by_rank.into_values().collect())
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Team holding `rank`, if any
    pub fn team_at(&self, rank: Rank) -> Option<&str> {
        let index = (rank as usize).checked_sub(1)?;
        self.teams.get(index).map(String::as_str)
    }

    pub fn rank_of(&self, team: &str) -> Option<Rank> {
        self.teams
            .iter()
            .position(|t| t == team)
            .map(|i| i as Rank + 1)
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    /// (rank, team) pairs from the top of the ladder down
    pub fn entries(&self) -> impl Iterator<Item = (Rank, &str)> {
        self.teams
            .iter()
            .enumerate()
            .map(|(i, t)| (i as Rank + 1, t.as_str()))
    }

    /// Insert a new team at `position` (1..=N+1), pushing lower teams down one rank.
    pub fn insert_team(&mut self, position: Rank, team: impl Into<String>) -> Result<()> {
        let team = team.into();
        if position == 0 || position as usize > self.teams.len() + 1 {
            return Err(LadderError::InvalidPosition {
                position,
                len: self.teams.len(),
            });
        }
        if self.rank_of(&team).is_some() {
            return Err(LadderError::MalformedRankList(format!(
                "team {} appears more than once",
                team
            )));
        }
        self.teams.insert(position as usize - 1, team);
        Ok(())
    }
}

#[cfg(test)]
#[path = "rank_list_tests.rs"]
mod rank_list_tests;
