//! The ladder aggregate: registry, rank lists and rounds.
//!
//! All state of a tournament lives in one [`Ladder`] value. Operations either
//! succeed completely or leave it untouched, so a caller that persists the
//! whole value after each operation never exposes a half-applied round.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::challenge::{generate_challenges, Challenge};
use crate::config::LadderConfig;
use crate::division::{assign_divisions, Division};
use crate::error::{LadderError, Result};
use crate::rank_list::RankList;
use crate::ranking::{update_ranking, RoundResult};
use crate::registry::{Team, TeamRegistry};
use crate::round::{RoundPhase, RoundRecord};
use crate::score::Score;
use crate::types::{Rank, Round};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLadder")]
pub struct Ladder {
    config: LadderConfig,
    registry: TeamRegistry,
    rankings: BTreeMap<Round, RankList>,
    rounds: BTreeMap<Round, RoundRecord>,
}

#[derive(Deserialize)]
struct RawLadder {
    config: LadderConfig,
    registry: TeamRegistry,
    rankings: BTreeMap<Round, RankList>,
    rounds: BTreeMap<Round, RoundRecord>,
}

impl TryFrom<RawLadder> for Ladder {
    type Error = LadderError;

    /// Rank lists must sit under their own round and name registered teams.
    fn try_from(raw: RawLadder) -> Result<Self> {
        for (round, list) in &raw.rankings {
            if list.round() != *round {
                return Err(LadderError::MalformedRankList(format!(
                    "rank list for round {} is stored under round {}",
                    list.round(),
                    round
                )));
            }
            for team in list.teams() {
                raw.registry.require(team)?;
            }
        }
        Ok(Self {
            config: raw.config,
            registry: raw.registry,
            rankings: raw.rankings,
            rounds: raw.rounds,
        })
    }
}

impl Ladder {
    pub fn new(config: LadderConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &LadderConfig {
        &self.config
    }

    pub fn registry(&self) -> &TeamRegistry {
        &self.registry
    }

    pub fn register_team(&mut self, team: Team) -> Result<()> {
        self.registry.register(team)
    }

    /// Latest round that has a rank list
    pub fn current_round(&self) -> Option<Round> {
        self.rankings.keys().next_back().copied()
    }

    pub fn rank_list(&self, round: Round) -> Option<&RankList> {
        self.rankings.get(&round)
    }

    pub fn round(&self, round: Round) -> Option<&RoundRecord> {
        self.rounds.get(&round)
    }

    /// Phase of a scheduled round
    pub fn phase(&self, round: Round) -> Option<RoundPhase> {
        self.rounds.get(&round).map(RoundRecord::phase)
    }

    /// Divisions for a round, derived from its rank list
    pub fn divisions(&self, round: Round) -> Result<Vec<Division>> {
        let list = self
            .rankings
            .get(&round)
            .ok_or(LadderError::MissingRankList(round))?;
        assign_divisions(list, self.config.remainder)
    }

    /// Manually seed the first round. Teams are given top to bottom.
    pub fn seed(&mut self, round: Round, teams: Vec<String>) -> Result<&RankList> {
        if let Some(first) = self.rankings.keys().next() {
            return Err(LadderError::AlreadySeeded(*first));
        }
        for team in &teams {
            self.registry.require(team)?;
        }
        let list = RankList::new(round, teams)?;
        if list.is_empty() {
            return Err(LadderError::MalformedRankList(
                "no teams to seed".to_string(),
            ));
        }
        info!(round = %round, teams = list.len(), "seeded ladder");
        Ok(self.rankings.entry(round).or_insert(list))
    }

    /// Insert a registered team into a round's rank list before it is scheduled.
    pub fn insert_team(&mut self, round: Round, position: Rank, team: &str) -> Result<()> {
        self.registry.require(team)?;
        if let Some(phase) = self.phase(round) {
            return Err(LadderError::RoundLocked { round, phase });
        }
        let list = self
            .rankings
            .get_mut(&round)
            .ok_or(LadderError::MissingRankList(round))?;
        list.insert_team(position, team)?;
        info!(round = %round, team, position, "inserted team");
        Ok(())
    }

    /// Assign divisions and generate the round's challenges.
    ///
    /// A round is scheduled once. To regenerate an unpublished round, clear it
    /// first with [`Ladder::clear_round`].
    pub fn schedule(&mut self, round: Round) -> Result<&[Challenge]> {
        if let Some(from) = self.phase(round) {
            return Err(LadderError::InvalidTransition {
                round,
                from,
                to: RoundPhase::Scheduled,
            });
        }
        let divisions = self.divisions(round)?;
        let challenges = generate_challenges(round, &divisions);
        info!(
            round = %round,
            divisions = divisions.len(),
            matches = challenges.len(),
            "scheduled round"
        );

        let record = self
            .rounds
            .entry(round)
            .or_insert(RoundRecord::new(round, challenges));
        Ok(&record.challenges)
    }

    /// Drop an unpublished round's challenges, scores included.
    pub fn clear_round(&mut self, round: Round) -> Result<()> {
        match self.phase(round) {
            None => Err(LadderError::NotScheduled(round)),
            Some(RoundPhase::RankingPublished) => Err(LadderError::InvalidTransition {
                round,
                from: RoundPhase::RankingPublished,
                to: RoundPhase::Scheduled,
            }),
            Some(_) => {
                self.rounds.remove(&round);
                info!(round = %round, "cleared round");
                Ok(())
            }
        }
    }

    /// Set the final score of a challenge. Scores are set once.
    pub fn record_score(&mut self, round: Round, code: u32, score: Score) -> Result<RoundPhase> {
        self.config.score.winner(score)?;

        let record = self
            .rounds
            .get_mut(&round)
            .ok_or(LadderError::NotScheduled(round))?;
        if record.result.is_some() {
            return Err(LadderError::InvalidTransition {
                round,
                from: RoundPhase::RankingPublished,
                to: RoundPhase::InProgress,
            });
        }

        let challenge = record
            .challenge_mut(code)
            .ok_or(LadderError::UnknownChallenge { round, code })?;
        if challenge.score.is_some() {
            return Err(LadderError::ScoreAlreadyRecorded { round, code });
        }
        challenge.score = Some(score);
        info!(key = %challenge.key(), score = %score, "recorded score");

        Ok(record.phase())
    }

    /// Compute and publish the next round's ranking from a complete round.
    ///
    /// Metrics, division outcomes and the next rank list are stored together.
    pub fn publish(&mut self, round: Round) -> Result<&RoundResult> {
        let from = self.phase(round).ok_or(LadderError::NotScheduled(round))?;
        if from != RoundPhase::Complete {
            return Err(LadderError::InvalidTransition {
                round,
                from,
                to: RoundPhase::RankingPublished,
            });
        }
        let list = self
            .rankings
            .get(&round)
            .ok_or(LadderError::MissingRankList(round))?;
        let record = self
            .rounds
            .get(&round)
            .ok_or(LadderError::NotScheduled(round))?;
        if let Some(next) = self.rankings.get(&round.next()) {
            return Err(LadderError::RoundLocked {
                round: next.round(),
                phase: RoundPhase::RankingPublished,
            });
        }

        let result = update_ranking(list, &record.challenges, &self.config)?;
        info!(round = %round, next = %result.next.round(), "published ranking");

        self.rankings.insert(round.next(), result.next.clone());
        let record = self
            .rounds
            .get_mut(&round)
            .ok_or(LadderError::NotScheduled(round))?;
        Ok(record.result.insert(result))
    }

    /// Scheduled rounds in order
    pub fn rounds(&self) -> impl Iterator<Item = &RoundRecord> {
        self.rounds.values()
    }
}

#[cfg(test)]
#[path = "ladder_tests.rs"]
mod ladder_tests;
