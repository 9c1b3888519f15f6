use super::*;

fn players(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("player{}", i)).collect()
}

#[test]
fn test_roster_bounds() {
    assert!(Team::new("squids", players(2)).is_ok());
    assert!(Team::new("squids", players(5)).is_ok());

    let err = Team::new("squids", players(1)).unwrap_err();
    assert!(matches!(err, LadderError::InvalidRoster { players: 1, .. }));

    let err = Team::new("squids", players(6)).unwrap_err();
    assert!(matches!(err, LadderError::InvalidRoster { players: 6, .. }));
}

#[test]
fn test_blank_players_are_dropped() {
    // An empty fifth column is not a player
    let team = Team::new(
        "octos",
        vec!["a".into(), "b".into(), "c".into(), "d".into(), "".into()],
    )
    .unwrap();
    assert_eq!(team.players.len(), 4);
}

#[test]
fn test_duplicate_registration() {
    let mut registry = TeamRegistry::new();
    registry.register(Team::new("squids", players(4)).unwrap()).unwrap();

    let err = registry
        .register(Team::new("squids", players(3)).unwrap())
        .unwrap_err();
    assert_eq!(err, LadderError::DuplicateTeam("squids".into()));
    assert_eq!(registry.iter().count(), 1);
}

#[test]
fn test_require_unknown_team() {
    let registry = TeamRegistry::new();
    assert_eq!(
        registry.require("ghost").unwrap_err(),
        LadderError::UnknownTeam("ghost".into())
    );
}

#[test]
fn test_blank_team_name() {
    assert_eq!(
        Team::new("  ", players(3)).unwrap_err(),
        LadderError::BlankTeamName
    );
    assert_eq!(Team::new(" squids ", players(3)).unwrap().name, "squids");
}

#[test]
fn test_stored_team_is_checked_on_load() {
    let team: Team = serde_json::from_str(r#"{"name":"squids","players":["a","b"]}"#).unwrap();
    assert_eq!(team.players.len(), 2);

    let short = serde_json::from_str::<Team>(r#"{"name":"squids","players":["a"]}"#);
    assert!(short.is_err());
    let blank = serde_json::from_str::<Team>(r#"{"name":"","players":["a","b"]}"#);
    assert!(blank.is_err());
}
