//! Ladder runner: loads the ladder, applies one operation, commits it

use anyhow::{anyhow, Context, Result};
use ladder_core::{
    Challenge, EntryOutcome, EntryPrompt, Ladder, RankList, Rank, Round, RoundPhase, RoundResult,
    Score, ScoreEntry, Team,
};
use std::io::{BufRead, Write};
use tracing::{info, warn};

use crate::config::SpladderConfig;
use crate::report::{challenge_line, phase_line, ranking_report, round_summary, schedule_report};
use crate::store::LadderStore;

/// A tournament bound to its store.
///
/// Every mutating operation works on a copy of the ladder and commits it as a
/// whole; on error neither the in-memory ladder nor the store changes.
pub struct Spladder<S: LadderStore> {
    config: SpladderConfig,
    store: S,
    ladder: Ladder,
}

impl<S: LadderStore> Spladder<S> {
    /// Open the tournament, starting an empty ladder if the store has none.
    pub fn open(config: SpladderConfig, store: S) -> Result<Self> {
        let ladder = match store.load()? {
            Some(stored) => {
                if stored.ladder.config() != &config.ladder {
                    warn!(
                        "ladder rules in config differ from stored rules, keeping stored rules"
                    );
                }
                info!(name = %stored.name, saved_at = %stored.saved_at, "loaded ladder");
                stored.ladder
            }
            None => Ladder::new(config.ladder),
        };
        Ok(Self {
            config,
            store,
            ladder,
        })
    }

    pub fn ladder(&self) -> &Ladder {
        &self.ladder
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Apply `op` to a copy of the ladder and commit the copy if it succeeds.
    fn apply<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Ladder) -> Result<T>,
    {
        let mut next = self.ladder.clone();
        let value = op(&mut next).inspect_err(|err| warn!(error = %err, "operation rejected"))?;
        self.store.commit(&self.config.name, &next)?;
        self.ladder = next;
        Ok(value)
    }

    /// Round that is being played: the latest round with a rank list
    pub fn current_round(&self) -> Result<Round> {
        self.ladder
            .current_round()
            .ok_or_else(|| anyhow!("Ladder has not been seeded yet"))
    }

    pub fn register_team(&mut self, name: &str, players: Vec<String>) -> Result<()> {
        let team = Team::new(name, players)?;
        self.apply(|ladder| Ok(ladder.register_team(team)?))
    }

    /// Seed the first round with teams listed top to bottom
    pub fn seed(&mut self, teams: Vec<String>) -> Result<RankList> {
        let round = self.config.first_round();
        self.apply(|ladder| Ok(ladder.seed(round, teams)?.clone()))
    }

    /// Insert a registered team into the current round's ranking
    pub fn add_team(&mut self, position: Rank, team: &str) -> Result<()> {
        let round = self.current_round()?;
        self.apply(|ladder| Ok(ladder.insert_team(round, position, team)?))
            .with_context(|| format!("Cannot add {} to round {}", team, round))
    }

    pub fn schedule(&mut self) -> Result<Vec<Challenge>> {
        let round = self.current_round()?;
        self.apply(|ladder| Ok(ladder.schedule(round)?.to_vec()))
            .with_context(|| format!("Cannot schedule round {}", round))
    }

    pub fn record_score(&mut self, code: u32, score: Score) -> Result<RoundPhase> {
        let round = self.current_round()?;
        self.apply(|ladder| Ok(ladder.record_score(round, code, score)?))
            .with_context(|| format!("Cannot record score for {}-{}", round, code))
    }

    /// Publish the current round's ranking. The new round becomes current.
    pub fn publish(&mut self) -> Result<RoundResult> {
        let round = self.current_round()?;
        self.apply(|ladder| Ok(ladder.publish(round)?.clone()))
            .with_context(|| format!("Cannot publish round {}", round))
    }

    /// Prompt for every unscored challenge of the current round.
    ///
    /// Each accepted score is committed as soon as it is entered. Returns the
    /// number of scores recorded.
    pub fn enter_scores<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<usize> {
        let round = self.current_round()?;
        let pending: Vec<Challenge> = self
            .ladder
            .round(round)
            .ok_or_else(|| anyhow!("Round {} has not been scheduled", round))?
            .pending()
            .cloned()
            .collect();

        let mut lines = input.lines();
        let mut recorded = 0;
        for challenge in pending {
            writeln!(output, "{}", challenge_line(&self.config.name, &challenge))?;
            let mut entry = ScoreEntry::new(self.ladder.config().score);

            let mut outcome = EntryOutcome::Prompt(EntryPrompt::ChallengerScore);
            while let EntryOutcome::Prompt(prompt) = outcome {
                match prompt {
                    EntryPrompt::ChallengerScore => write!(
                        output,
                        "Input score for challenger {}: ",
                        challenge.challenger.team
                    )?,
                    EntryPrompt::DefenderScore => {
                        write!(output, "Input score for defender {}: ", challenge.defender.team)?
                    }
                    EntryPrompt::Retry => write!(output, "Invalid score. Try again? y/n ")?,
                }
                output.flush()?;

                let Some(line) = lines.next() else {
                    return Ok(recorded);
                };
                outcome = entry.feed(&line?);
            }

            match outcome {
                EntryOutcome::Accepted(score) => {
                    self.record_score(challenge.code, score)?;
                    writeln!(output, "Recorded {} for [{}]", score, challenge.key())?;
                    recorded += 1;
                }
                _ => writeln!(output, "Skipped [{}]", challenge.key())?,
            }
        }
        Ok(recorded)
    }

    /// Status of every round plus the current schedule and ranking
    pub fn overview(&self) -> Result<String> {
        let round = self.current_round()?;
        let mut report = String::new();
        report.push_str(&format!(
            "{}: {} teams registered\n",
            self.config.name,
            self.ladder.registry().iter().count()
        ));
        for record in self.ladder.rounds() {
            report.push_str(&phase_line(record));
            report.push('\n');
        }
        report.push('\n');

        if let Some(record) = self.ladder.round(round) {
            report.push_str(&schedule_report(&self.config.name, record));
            report.push('\n');
        }
        if let Some(previous) = round.0.checked_sub(1).map(Round) {
            if let Some(result) = self.ladder.round(previous).and_then(|r| r.result.as_ref()) {
                report.push_str(&round_summary(result));
                report.push('\n');
            }
        }
        let list = self
            .ladder
            .rank_list(round)
            .ok_or_else(|| anyhow!("No ranking for round {}", round))?;
        report.push_str(&ranking_report(list));
        Ok(report)
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
