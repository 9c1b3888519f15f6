//! Score entry as a state machine.
//!
//! Reading scores from a person is a request/response loop: ask for the
//! challenger's sets, then the defender's, check the pair, and on a bad pair
//! ask whether to try again. [`ScoreEntry`] holds that loop's state so the
//! caller only moves text in and out; only legal scores ever come out.

use tracing::debug;

use crate::score::{Score, ScoreRules};

/// What the caller should ask for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPrompt {
    ChallengerScore,
    DefenderScore,
    /// The last pair was illegal. `y` starts over, anything else gives up.
    Retry,
}

/// Result of feeding one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    Prompt(EntryPrompt),
    Accepted(Score),
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryState {
    Challenger,
    Defender { challenger: u8 },
    Retry,
    Done(Option<Score>),
}

/// Collects one challenge's score.
#[derive(Debug, Clone)]
pub struct ScoreEntry {
    rules: ScoreRules,
    state: EntryState,
}

impl ScoreEntry {
    pub fn new(rules: ScoreRules) -> Self {
        Self {
            rules,
            state: EntryState::Challenger,
        }
    }

    /// Current prompt, or `None` once the entry is finished
    pub fn prompt(&self) -> Option<EntryPrompt> {
        match self.state {
            EntryState::Challenger => Some(EntryPrompt::ChallengerScore),
            EntryState::Defender { .. } => Some(EntryPrompt::DefenderScore),
            EntryState::Retry => Some(EntryPrompt::Retry),
            EntryState::Done(_) => None,
        }
    }

    fn outcome(&self) -> EntryOutcome {
        match (self.state, self.prompt()) {
            (EntryState::Done(Some(score)), _) => EntryOutcome::Accepted(score),
            (_, Some(prompt)) => EntryOutcome::Prompt(prompt),
            _ => EntryOutcome::Abandoned,
        }
    }

    /// Feed one line of input.
    ///
    /// Unparseable set counts repeat the current prompt. Once finished, the
    /// final outcome is returned for any further input.
    pub fn feed(&mut self, input: &str) -> EntryOutcome {
        let input = input.trim();
        self.state = match self.state {
            EntryState::Challenger => match input.parse::<u8>() {
                Ok(challenger) => EntryState::Defender { challenger },
                Err(_) => EntryState::Challenger,
            },
            EntryState::Defender { challenger } => match input.parse::<u8>() {
                Ok(defender) => {
                    let score = Score::new(challenger, defender);
                    if self.rules.is_valid(score) {
                        EntryState::Done(Some(score))
                    } else {
                        debug!(score = %score, "rejected score");
                        EntryState::Retry
                    }
                }
                Err(_) => EntryState::Defender { challenger },
            },
            EntryState::Retry if input.eq_ignore_ascii_case("y") => EntryState::Challenger,
            EntryState::Retry => EntryState::Done(None),
            done @ EntryState::Done(_) => done,
        };
        self.outcome()
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod entry_tests;
