//! Multi-round scenarios driven through the `Ladder` aggregate

use ladder_core::{Ladder, LadderConfig, RoundPhase, Round, Score, Team};

fn nine_team_ladder() -> Ladder {
    let mut ladder = Ladder::new(LadderConfig::default());
    let names: Vec<String> = (1..=9).map(|i| format!("T{}", i)).collect();
    for name in &names {
        let roster = vec!["p1".into(), "p2".into(), "p3".into(), "p4".into()];
        ladder.register_team(Team::new(name.clone(), roster).unwrap()).unwrap();
    }
    ladder.seed(Round(1), names).unwrap();
    ladder
}

/// Score every challenge of the round, favouring the defender
fn defenders_win(ladder: &mut Ladder, round: Round) {
    let codes: Vec<u32> = ladder
        .round(round)
        .unwrap()
        .pending()
        .map(|c| c.code)
        .collect();
    for code in codes {
        ladder.record_score(round, code, Score::new(2, 4)).unwrap();
    }
}

// =============================================================================
// Round 1 of a nine-team ladder
// =============================================================================

#[test]
fn test_nine_team_first_round() {
    let mut ladder = nine_team_ladder();

    let divisions = ladder.divisions(Round(1)).unwrap();
    let grouped: Vec<Vec<String>> = divisions.iter().map(|d| d.teams().to_vec()).collect();
    assert_eq!(
        grouped,
        vec![
            vec!["T1", "T2", "T3"],
            vec!["T4", "T5", "T6"],
            vec!["T7", "T8", "T9"]
        ]
    );

    ladder.schedule(Round(1)).unwrap();
    defenders_win(&mut ladder, Round(1));
    let result = ladder.publish(Round(1)).unwrap();

    assert_eq!(result.outcomes[0].winner, "T1");
    assert_eq!(result.outcomes[0].middle.as_deref(), Some("T2"));
    assert_eq!(result.outcomes[0].loser, "T3");
    assert_eq!(result.next.rank_of("T4"), Some(3));
    assert_eq!(result.next.rank_of("T3"), Some(4));
}

// =============================================================================
// Several rounds in a row
// =============================================================================

#[test]
fn test_defenders_holding_shifts_boundaries_each_round() {
    let mut ladder = nine_team_ladder();

    for round in 1..=3 {
        let round = Round(round);
        ladder.schedule(round).unwrap();
        defenders_win(&mut ladder, round);
        ladder.publish(round).unwrap();
        assert_eq!(ladder.phase(round), Some(RoundPhase::RankingPublished));
    }

    // Each round the boundary pairs (3,4) and (6,7) trade places again
    let round2: Vec<&str> = ladder.rank_list(Round(2)).unwrap().teams().iter().map(String::as_str).collect();
    assert_eq!(round2, vec!["T1", "T2", "T4", "T3", "T5", "T7", "T6", "T8", "T9"]);

    let round3: Vec<&str> = ladder.rank_list(Round(3)).unwrap().teams().iter().map(String::as_str).collect();
    assert_eq!(round3, vec!["T1", "T2", "T3", "T4", "T5", "T6", "T7", "T8", "T9"]);

    assert_eq!(ladder.current_round(), Some(Round(4)));
    assert_eq!(ladder.rounds().count(), 3);
}

#[test]
fn test_new_team_joins_between_rounds() {
    let mut ladder = nine_team_ladder();
    ladder.schedule(Round(1)).unwrap();
    defenders_win(&mut ladder, Round(1));
    ladder.publish(Round(1)).unwrap();

    let roster = vec!["n1".into(), "n2".into()];
    ladder.register_team(Team::new("T10", roster).unwrap()).unwrap();
    ladder.insert_team(Round(2), 10, "T10").unwrap();

    // 10 teams: 2 + 3 + 3 + 2
    let sizes: Vec<usize> = ladder
        .divisions(Round(2))
        .unwrap()
        .iter()
        .map(|d| d.size())
        .collect();
    assert_eq!(sizes, vec![2, 3, 3, 2]);

    let challenges = ladder.schedule(Round(2)).unwrap();
    assert_eq!(challenges.len(), 1 + 3 + 3 + 1);
}
