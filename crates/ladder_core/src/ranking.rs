//! Ranking update: from a completed round to the next round's rank list.
//!
//! The update runs in four steps:
//! 1. every challenge is checked (scored, legal, consistent with the rank
//!    list) before any metric is touched;
//! 2. wins, losses and sets are accumulated per team;
//! 3. each division is ordered by wins, then set differential, then original
//!    rank descending, giving winner / middle / loser;
//! 4. divisions are concatenated and, top-down, each division's loser trades
//!    places with the team directly below it.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use crate::challenge::{expected_pairings, Challenge};
use crate::config::LadderConfig;
use crate::division::{assign_divisions, Division};
use crate::error::{LadderError, Result};
use crate::rank_list::RankList;
use crate::score::{ScoreRules, Side};
use crate::types::{Rank, Round, Seat};

/// Per-team results for one round. Derived from the round's challenges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoundMetric {
    pub team: String,
    pub round: Round,
    pub division: usize,
    /// Rank held at the start of the round
    pub rank: Rank,
    pub wins: u32,
    pub losses: u32,
    pub sets_gained: u32,
    pub sets_lost: u32,
}

impl TeamRoundMetric {
    fn new(team: &str, round: Round, division: usize, rank: Rank) -> Self {
        Self {
            team: team.to_string(),
            round,
            division,
            rank,
            wins: 0,
            losses: 0,
            sets_gained: 0,
            sets_lost: 0,
        }
    }

    pub fn set_differential(&self) -> i64 {
        self.sets_gained as i64 - self.sets_lost as i64
    }
}

/// Order of teams inside a division after a round, best first.
///
/// Wins descending, then set differential descending, then original rank
/// descending: on a full tie the team that started lower moves up.
pub fn standing_order(a: &TeamRoundMetric, b: &TeamRoundMetric) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| b.set_differential().cmp(&a.set_differential()))
        .then_with(|| b.rank.cmp(&a.rank))
}

/// Winner, middle (3-team divisions only) and loser of a division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionOutcome {
    pub division: usize,
    pub winner: String,
    pub middle: Option<String>,
    pub loser: String,
}

impl DivisionOutcome {
    /// Teams in finishing order
    pub fn order(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.winner.as_str())
            .chain(self.middle.as_deref())
            .chain(std::iter::once(self.loser.as_str()))
    }
}

/// A promotion/relegation swap applied to the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    /// Loser of the upper division, moves down one rank
    pub relegated: String,
    /// Team directly below it, moves up one rank
    pub promoted: String,
    /// Rank the promoted team ends up holding
    pub rank: Rank,
}

/// Everything derived from a completed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: Round,
    /// Metrics in starting-rank order
    pub metrics: Vec<TeamRoundMetric>,
    pub outcomes: Vec<DivisionOutcome>,
    pub swaps: Vec<Swap>,
    /// Rank list for the following round
    pub next: RankList,
}

/// Check every challenge against the rank list and its divisions.
///
/// Returns the winning side of each challenge, in challenge order. Nothing is
/// accumulated until every challenge has passed.
fn validate_round(
    rank_list: &RankList,
    divisions: &[Division],
    challenges: &[Challenge],
    rules: ScoreRules,
) -> Result<Vec<Side>> {
    let round = rank_list.round();
    let mut played: BTreeMap<(Rank, Rank), u32> = BTreeMap::new();
    let mut winners = Vec::with_capacity(challenges.len());

    let mismatch = |c: &Challenge, reason: String| LadderError::ChallengeMismatch {
        round: c.round,
        code: c.code,
        reason,
    };

    for challenge in challenges {
        if challenge.round != round {
            return Err(mismatch(
                challenge,
                format!("belongs to round {}, not round {}", challenge.round, round),
            ));
        }
        for seat in [&challenge.defender, &challenge.challenger] {
            if rank_list.team_at(seat.rank) != Some(seat.team.as_str()) {
                return Err(mismatch(
                    challenge,
                    format!("{} does not hold rank {}", seat.team, seat.rank),
                ));
            }
        }

        let score = challenge.score.ok_or(LadderError::IncompleteRound {
            round,
            code: challenge.code,
        })?;
        winners.push(rules.winner(score)?);

        let low = challenge.defender.rank.min(challenge.challenger.rank);
        let high = challenge.defender.rank.max(challenge.challenger.rank);
        *played.entry((low, high)).or_insert(0) += 1;
    }

    let mut expected = BTreeSet::new();
    for division in divisions {
        for pair in expected_pairings(division) {
            let count = played.get(&pair).copied().unwrap_or(0);
            if count != 1 {
                let reason = if count == 0 {
                    format!("no match between ranks {} and {}", pair.0, pair.1)
                } else {
                    format!("ranks {} and {} played {} times", pair.0, pair.1, count)
                };
                return Err(LadderError::UnresolvedDivision {
                    division: division.name(),
                    reason,
                });
            }
            expected.insert(pair);
        }
    }

    if let Some(challenge) = challenges.iter().find(|c| {
        let low = c.defender.rank.min(c.challenger.rank);
        let high = c.defender.rank.max(c.challenger.rank);
        !expected.contains(&(low, high))
    }) {
        return Err(mismatch(
            challenge,
            "teams are not in the same division".to_string(),
        ));
    }

    Ok(winners)
}

/// Wins, losses and sets per team. `winners` comes from `validate_round`.
fn accumulate(challenges: &[Challenge], winners: &[Side]) -> BTreeMap<String, TeamRoundMetric> {
    let mut metrics = BTreeMap::new();

    for (challenge, side) in challenges.iter().zip(winners) {
        // Validated before accumulation
        let Some(score) = challenge.score else { continue };

        let challenger_won = *side == Side::Challenger;
        record(
            &mut metrics,
            challenge,
            &challenge.challenger,
            challenger_won,
            score.challenger,
            score.defender,
        );
        record(
            &mut metrics,
            challenge,
            &challenge.defender,
            !challenger_won,
            score.defender,
            score.challenger,
        );

        debug!(
            key = %challenge.key(),
            score = %score,
            winner = ?side,
            "counted challenge"
        );
    }

    metrics
}

fn record(
    metrics: &mut BTreeMap<String, TeamRoundMetric>,
    challenge: &Challenge,
    seat: &Seat,
    won: bool,
    gained: u8,
    lost: u8,
) {
    let metric = metrics.entry(seat.team.clone()).or_insert_with(|| {
        TeamRoundMetric::new(&seat.team, challenge.round, challenge.division, seat.rank)
    });
    if won {
        metric.wins += 1;
    } else {
        metric.losses += 1;
    }
    metric.sets_gained += gained as u32;
    metric.sets_lost += lost as u32;
}

/// Order a division's members and pick winner, middle and loser.
pub fn division_outcome(
    division: &Division,
    metrics: &BTreeMap<String, TeamRoundMetric>,
) -> Result<DivisionOutcome> {
    let mut standings = Vec::with_capacity(division.size());
    for (_, team) in division.members() {
        let metric = metrics
            .get(team)
            .ok_or_else(|| LadderError::UnresolvedDivision {
                division: division.name(),
                reason: format!("{} played no matches", team),
            })?;
        standings.push(metric);
    }
    standings.sort_by(|a, b| standing_order(a, b));

    let outcome = match standings.as_slice() {
        [winner, loser] => DivisionOutcome {
            division: division.index(),
            winner: winner.team.clone(),
            middle: None,
            loser: loser.team.clone(),
        },
        [winner, middle, loser] => DivisionOutcome {
            division: division.index(),
            winner: winner.team.clone(),
            middle: Some(middle.team.clone()),
            loser: loser.team.clone(),
        },
        _ => {
            return Err(LadderError::UnresolvedDivision {
                division: division.name(),
                reason: format!("{} teams, expected 2 or 3", standings.len()),
            })
        }
    };

    debug!(
        division = %division.name(),
        winner = %outcome.winner,
        middle = ?outcome.middle,
        loser = %outcome.loser,
        "division resolved"
    );
    Ok(outcome)
}

/// Concatenate division orders and apply the loser swaps top-down.
///
/// Each swap acts on the list as left by the previous one. The bottom
/// division has nobody to swap with.
pub fn apply_swaps(outcomes: &[DivisionOutcome]) -> Result<(Vec<String>, Vec<Swap>)> {
    let mut order: Vec<String> = outcomes
        .iter()
        .flat_map(|o| o.order().map(str::to_string))
        .collect();
    let mut swaps = Vec::new();

    let upper = outcomes.len().saturating_sub(1);
    for outcome in &outcomes[..upper] {
        let pos = order
            .iter()
            .position(|t| *t == outcome.loser)
            .ok_or_else(|| LadderError::UnknownTeam(outcome.loser.clone()))?;
        if pos + 1 >= order.len() {
            continue;
        }

        let swap = Swap {
            relegated: outcome.loser.clone(),
            promoted: order[pos + 1].clone(),
            rank: pos as Rank + 1,
        };
        debug!(
            relegated = %swap.relegated,
            promoted = %swap.promoted,
            rank = swap.rank,
            "swapping"
        );
        order.swap(pos, pos + 1);
        swaps.push(swap);
    }

    Ok((order, swaps))
}

/// Compute the next round's rank list from a completed round.
///
/// `rank_list` is the ranking the round was scheduled from; divisions are
/// re-derived from it with `config.remainder`. Any unscored, illegal or
/// inconsistent challenge aborts the whole update.
pub fn update_ranking(
    rank_list: &RankList,
    challenges: &[Challenge],
    config: &LadderConfig,
) -> Result<RoundResult> {
    let round = rank_list.round();
    let divisions = assign_divisions(rank_list, config.remainder)?;
    let winners = validate_round(rank_list, &divisions, challenges, config.score)?;

    let metrics = accumulate(challenges, &winners);
    let outcomes = divisions
        .iter()
        .map(|division| division_outcome(division, &metrics))
        .collect::<Result<Vec<_>>>()?;
    let (order, swaps) = apply_swaps(&outcomes)?;
    let next = RankList::new(round.next(), order)?;

    let mut metrics: Vec<TeamRoundMetric> = metrics.into_values().collect();
    metrics.sort_by_key(|m| m.rank);

    info!(
        round = %round,
        teams = next.len(),
        swaps = swaps.len(),
        "ranking updated"
    );
    Ok(RoundResult {
        round,
        metrics,
        outcomes,
        swaps,
        next,
    })
}

#[cfg(test)]
#[path = "ranking_tests.rs"]
mod ranking_tests;
