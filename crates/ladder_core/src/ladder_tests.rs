use super::*;

fn registered(n: usize) -> Ladder {
    let mut ladder = Ladder::new(LadderConfig::default());
    for i in 1..=n {
        let team = Team::new(format!("T{}", i), vec!["a".into(), "b".into(), "c".into()]).unwrap();
        ladder.register_team(team).unwrap();
    }
    ladder
}

fn seeded(n: usize) -> Ladder {
    let mut ladder = registered(n);
    let teams = (1..=n).map(|i| format!("T{}", i)).collect();
    ladder.seed(Round(1), teams).unwrap();
    ladder
}

fn score_all(ladder: &mut Ladder, round: Round, score: Score) {
    let codes: Vec<u32> = ladder.round(round).unwrap().challenges.iter().map(|c| c.code).collect();
    for code in codes {
        ladder.record_score(round, code, score).unwrap();
    }
}

#[test]
fn test_seed_requires_registered_teams() {
    let mut ladder = registered(2);
    let err = ladder
        .seed(Round(1), vec!["T1".into(), "ghost".into()])
        .unwrap_err();
    assert_eq!(err, LadderError::UnknownTeam("ghost".into()));
    assert_eq!(ladder.current_round(), None);
}

#[test]
fn test_seed_only_once() {
    let mut ladder = seeded(3);
    let err = ladder.seed(Round(2), vec!["T1".into()]).unwrap_err();
    assert_eq!(err, LadderError::AlreadySeeded(Round(1)));
}

#[test]
fn test_round_lifecycle() {
    let mut ladder = seeded(6);
    let round = Round(1);
    assert_eq!(ladder.phase(round), None);

    assert_eq!(ladder.schedule(round).unwrap().len(), 6);
    assert_eq!(ladder.phase(round), Some(RoundPhase::Scheduled));

    assert_eq!(
        ladder.record_score(round, 1, Score::new(1, 4)).unwrap(),
        RoundPhase::InProgress
    );

    // Publishing an incomplete round is refused
    let err = ladder.publish(round).unwrap_err();
    assert!(matches!(
        err,
        LadderError::InvalidTransition {
            from: RoundPhase::InProgress,
            to: RoundPhase::RankingPublished,
            ..
        }
    ));

    for code in 2..=6 {
        ladder.record_score(round, code, Score::new(1, 4)).unwrap();
    }
    assert_eq!(ladder.phase(round), Some(RoundPhase::Complete));

    let result = ladder.publish(round).unwrap();
    assert_eq!(result.next.teams(), &["T1", "T2", "T4", "T3", "T5", "T6"]);
    assert_eq!(ladder.phase(round), Some(RoundPhase::RankingPublished));
    assert_eq!(ladder.current_round(), Some(Round(2)));
    assert!(ladder.rank_list(Round(2)).is_some());
}

#[test]
fn test_schedule_twice_is_rejected() {
    let mut ladder = seeded(4);
    ladder.schedule(Round(1)).unwrap();
    let before = ladder.round(Round(1)).cloned();

    let err = ladder.schedule(Round(1)).unwrap_err();
    assert!(matches!(err, LadderError::InvalidTransition { .. }));
    assert_eq!(ladder.round(Round(1)).cloned(), before);

    ladder.clear_round(Round(1)).unwrap();
    assert_eq!(ladder.schedule(Round(1)).unwrap().len(), 2);
}

#[test]
fn test_published_round_is_append_only() {
    let mut ladder = seeded(3);
    ladder.schedule(Round(1)).unwrap();
    score_all(&mut ladder, Round(1), Score::new(4, 0));
    ladder.publish(Round(1)).unwrap();

    assert!(ladder.clear_round(Round(1)).is_err());
    assert!(ladder.schedule(Round(1)).is_err());
    assert!(ladder.publish(Round(1)).is_err());
    assert!(matches!(
        ladder.record_score(Round(1), 1, Score::new(4, 0)),
        Err(LadderError::InvalidTransition { .. })
    ));
}

#[test]
fn test_score_is_set_once() {
    let mut ladder = seeded(2);
    ladder.schedule(Round(1)).unwrap();
    ladder.record_score(Round(1), 1, Score::new(4, 3)).unwrap();

    assert_eq!(
        ladder.record_score(Round(1), 1, Score::new(3, 4)).unwrap_err(),
        LadderError::ScoreAlreadyRecorded {
            round: Round(1),
            code: 1
        }
    );
    assert_eq!(
        ladder.round(Round(1)).unwrap().challenge(1).unwrap().score,
        Some(Score::new(4, 3))
    );
}

#[test]
fn test_invalid_score_never_recorded() {
    let mut ladder = seeded(2);
    ladder.schedule(Round(1)).unwrap();

    let err = ladder.record_score(Round(1), 1, Score::new(3, 3)).unwrap_err();
    assert!(matches!(err, LadderError::InvalidScore { .. }));
    assert_eq!(ladder.phase(Round(1)), Some(RoundPhase::Scheduled));

    assert_eq!(
        ladder.record_score(Round(1), 9, Score::new(4, 0)).unwrap_err(),
        LadderError::UnknownChallenge {
            round: Round(1),
            code: 9
        }
    );
    assert_eq!(
        ladder.record_score(Round(2), 1, Score::new(4, 0)).unwrap_err(),
        LadderError::NotScheduled(Round(2))
    );
}

#[test]
fn test_insert_team_before_scheduling() {
    let mut ladder = seeded(3);
    ladder.register_team(Team::new("new", vec!["x".into(), "y".into()]).unwrap()).unwrap();

    ladder.insert_team(Round(1), 2, "new").unwrap();
    assert_eq!(ladder.rank_list(Round(1)).unwrap().rank_of("new"), Some(2));
    assert_eq!(ladder.divisions(Round(1)).unwrap().len(), 2);

    ladder.schedule(Round(1)).unwrap();
    let err = ladder.insert_team(Round(1), 1, "new").unwrap_err();
    assert!(matches!(err, LadderError::RoundLocked { .. }));
}

#[test]
fn test_insert_unregistered_team() {
    let mut ladder = seeded(3);
    assert_eq!(
        ladder.insert_team(Round(1), 1, "ghost").unwrap_err(),
        LadderError::UnknownTeam("ghost".into())
    );
}

#[test]
fn test_schedule_without_rank_list() {
    let mut ladder = registered(3);
    assert_eq!(
        ladder.schedule(Round(1)).unwrap_err(),
        LadderError::MissingRankList(Round(1))
    );
}

#[test]
fn test_ladder_round_trips_through_json() {
    let mut ladder = seeded(5);
    ladder.schedule(Round(1)).unwrap();
    score_all(&mut ladder, Round(1), Score::new(2, 4));
    ladder.publish(Round(1)).unwrap();

    let json = serde_json::to_string(&ladder).unwrap();
    let restored: Ladder = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, ladder);
}

#[test]
fn test_seed_needs_teams() {
    let mut ladder = registered(2);
    assert!(matches!(
        ladder.seed(Round(1), Vec::new()),
        Err(LadderError::MalformedRankList(_))
    ));
    assert_eq!(ladder.current_round(), None);
}

#[test]
fn test_stored_ladder_is_checked_on_load() {
    let ladder = seeded(3);
    let mut value = serde_json::to_value(&ladder).unwrap();

    // A rank list naming a team that was never registered
    value["rankings"]["1"]["teams"][2] = "ghost".into();
    let err = serde_json::from_value::<Ladder>(value.clone()).unwrap_err();
    assert!(err.to_string().contains("unknown team: ghost"), "{}", err);

    // A rank list filed under the wrong round
    value["rankings"]["1"]["teams"][2] = "T3".into();
    value["rankings"]["1"]["round"] = 2.into();
    let err = serde_json::from_value::<Ladder>(value).unwrap_err();
    assert!(err.to_string().contains("stored under round 1"), "{}", err);
}
