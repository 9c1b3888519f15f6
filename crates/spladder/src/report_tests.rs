use super::*;
use ladder_core::{
    assign_divisions, generate_challenges, update_ranking, LadderConfig, Round, Score,
};

fn played_round() -> (RankList, RoundRecord) {
    let list = RankList::new(
        Round(2),
        vec!["A".into(), "B".into(), "C".into(), "D".into(), "E".into()],
    )
    .unwrap();
    let divisions = assign_divisions(&list, Default::default()).unwrap();
    let challenges = generate_challenges(Round(2), &divisions);
    (list, RoundRecord::new(Round(2), challenges))
}

#[test]
fn test_challenge_line() {
    let (_, mut record) = played_round();
    let line = challenge_line("spladder8", &record.challenges[0]);
    assert_eq!(line, "spladder8 Div X [2-1] 2位 B vs 1位 A");

    record.challenges[1].score = Some(Score::new(4, 1));
    let line = challenge_line("spladder8", &record.challenges[1]);
    assert_eq!(line, "spladder8 Div S+ Upper [2-2] 4位 D vs 3位 C (4-1)");
}

#[test]
fn test_schedule_report_lists_every_match() {
    let (_, record) = played_round();
    let report = schedule_report("spladder8", &record);
    assert!(report.starts_with("=== spladder8 Round 2 (scheduled, 0/4 scored) ==="));
    assert_eq!(report.lines().count(), 5);
}

#[test]
fn test_ranking_report() {
    let (list, _) = played_round();
    let report = ranking_report(&list);
    assert!(report.contains("=== Ranking for round 2 ==="));
    assert!(report.lines().any(|l| l.trim_start().starts_with("5  E")));
}

#[test]
fn test_round_summary_mentions_swaps() {
    let (list, mut record) = played_round();
    for challenge in &mut record.challenges {
        challenge.score = Some(Score::new(1, 4));
    }
    let result = update_ranking(&list, &record.challenges, &LadderConfig::default()).unwrap();

    let summary = round_summary(&result);
    assert!(summary.contains("Division X"));
    assert!(summary.contains("C moves up to rank 2, B drops to rank 3"));
}

#[test]
fn test_phase_line() {
    let (_, mut record) = played_round();
    record.challenges[0].score = Some(Score::new(4, 0));
    assert_eq!(phase_line(&record), "Round 2: in progress (1 of 4 matches scored)");
}
