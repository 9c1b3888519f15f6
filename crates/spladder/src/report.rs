//! Text reports for schedules, rankings and round results

use ladder_core::{division_name, Challenge, RankList, RoundPhase, RoundRecord, RoundResult};

/// One schedule line, e.g. `spladder8 Div X [3-1] 2位 Foo vs 1位 Bar`
pub fn challenge_line(name: &str, challenge: &Challenge) -> String {
    let mut line = format!(
        "{} Div {} [{}] {}位 {} vs {}位 {}",
        name,
        challenge.division_name(),
        challenge.key(),
        challenge.challenger.rank,
        challenge.challenger.team,
        challenge.defender.rank,
        challenge.defender.team
    );
    if let Some(score) = challenge.score {
        line.push_str(&format!(" ({})", score));
    }
    line
}

/// Match schedule of a round, in code order
pub fn schedule_report(name: &str, record: &RoundRecord) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "=== {} Round {} ({}, {}/{} scored) ===\n",
        name,
        record.round,
        record.phase(),
        record.scored(),
        record.challenges.len()
    ));
    for challenge in &record.challenges {
        report.push_str(&challenge_line(name, challenge));
        report.push('\n');
    }
    report
}

/// Ranking table of a round
pub fn ranking_report(list: &RankList) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== Ranking for round {} ===\n", list.round()));
    report.push_str(&format!("{:>5}  {:<30}\n", "Rank", "Team"));
    report.push_str(&"-".repeat(37));
    report.push('\n');
    for (rank, team) in list.entries() {
        report.push_str(&format!("{:>5}  {:<30}\n", rank, team));
    }
    report
}

/// Division outcomes, team metrics and swaps of a published round
pub fn round_summary(result: &RoundResult) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== Round {} results ===\n\n", result.round));

    for outcome in &result.outcomes {
        report.push_str(&format!(
            "Division {:<10} Winner: {}  Middle: {}  Loser: {}\n",
            division_name(outcome.division),
            outcome.winner,
            outcome.middle.as_deref().unwrap_or("-"),
            outcome.loser
        ));
    }

    report.push('\n');
    report.push_str(&format!(
        "{:<30} {:>4} {:>4} {:>5} {:>5}\n",
        "Team", "W", "L", "Sets+", "Sets-"
    ));
    report.push_str(&"-".repeat(52));
    report.push('\n');
    for metric in &result.metrics {
        report.push_str(&format!(
            "{:<30} {:>4} {:>4} {:>5} {:>5}\n",
            metric.team, metric.wins, metric.losses, metric.sets_gained, metric.sets_lost
        ));
    }

    report.push('\n');
    for swap in &result.swaps {
        report.push_str(&format!(
            "{} moves up to rank {}, {} drops to rank {}\n",
            swap.promoted,
            swap.rank,
            swap.relegated,
            swap.rank + 1
        ));
    }
    report
}

/// Short status line for a round
pub fn phase_line(record: &RoundRecord) -> String {
    match record.phase() {
        RoundPhase::RankingPublished => format!("Round {}: published", record.round),
        phase => format!(
            "Round {}: {} ({} of {} matches scored)",
            record.round,
            phase,
            record.scored(),
            record.challenges.len()
        ),
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
