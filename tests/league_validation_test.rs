use chrono::Utc;
use uuid::Uuid;

use football_league_backend::league::error::LeagueError;
use football_league_backend::league::validation::LeagueValidator;
use football_league_backend::models::club::{CreateClubRequest, UpdateClubRequest};
use football_league_backend::models::matches::{MatchStats, MatchStatus, NewMatch};
use football_league_backend::models::tournament::CreateTournamentRequest;

fn new_match(stats: MatchStats) -> NewMatch {
    NewMatch {
        home_club_id: Uuid::new_v4(),
        away_club_id: Uuid::new_v4(),
        tournament_id: None,
        town: "Leeds".into(),
        stadium: "Elland Road".into(),
        kickoff_at: Utc::now(),
        status: MatchStatus::Finished,
        stats,
    }
}

fn club_request() -> CreateClubRequest {
    CreateClubRequest {
        name: "Leeds United".into(),
        country: "England".into(),
        town: "Leeds".into(),
        price: 120,
        emblem: None,
        founded: 1919,
        stadium: "Elland Road".into(),
        avg_goals_for: 1.4,
        avg_goals_against: 1.1,
        possession_avg: 52,
    }
}

#[test]
fn test_validate_opponents() {
    let validator = LeagueValidator::new();
    let club = Uuid::new_v4();

    assert!(validator.validate_opponents(club, Uuid::new_v4()).is_ok());
    assert!(matches!(
        validator.validate_opponents(club, club),
        Err(LeagueError::InvariantViolation(_))
    ));
    assert!(validator.validate_opponents(Uuid::nil(), club).is_err());
}

#[test]
fn test_validate_match_stats() {
    let validator = LeagueValidator::new();
    let valid = MatchStats {
        home_goals: 2,
        away_goals: 1,
        home_possession: 58,
        away_possession: 42,
        home_shots: 14,
        away_shots: 9,
        home_shots_on_target: 6,
        away_shots_on_target: 3,
        home_red_cards: 0,
        away_red_cards: 1,
        home_saves: 2,
        away_saves: 4,
    };
    assert!(validator.validate_match_stats(&valid).is_ok());
    assert!(validator.validate_match_stats(&MatchStats::default()).is_ok());

    // Possession must add up to 100
    let lopsided = MatchStats { away_possession: 50, ..valid };
    assert!(validator.validate_match_stats(&lopsided).is_err());

    let negative_goals = MatchStats { home_goals: -1, ..valid };
    assert!(validator.validate_match_stats(&negative_goals).is_err());

    let negative_saves = MatchStats { away_saves: -3, ..valid };
    assert!(validator.validate_match_stats(&negative_saves).is_err());

    let impossible_shots = MatchStats { home_shots_on_target: 15, ..valid };
    assert!(validator.validate_match_stats(&impossible_shots).is_err());
}

#[test]
fn test_validate_scores() {
    let validator = LeagueValidator::new();

    assert!(validator.validate_scores(0, 0).is_ok());
    assert!(validator.validate_scores(7, 1).is_ok());
    assert!(validator.validate_scores(-1, 0).is_err());
    assert!(validator.validate_scores(0, -1).is_err());
    assert!(validator.validate_scores(51, 0).is_err());
}

#[test]
fn test_validate_new_match() {
    let validator = LeagueValidator::new();
    assert!(validator.validate_new_match(&new_match(MatchStats::default())).is_ok());

    let mut same_club = new_match(MatchStats::default());
    same_club.away_club_id = same_club.home_club_id;
    assert!(validator.validate_new_match(&same_club).is_err());

    let mut no_stadium = new_match(MatchStats::default());
    no_stadium.stadium = "   ".into();
    assert!(validator.validate_new_match(&no_stadium).is_err());
}

#[test]
fn test_validate_club_requests() {
    let validator = LeagueValidator::new();
    assert!(validator.validate_create_club_request(&club_request()).is_ok());

    let free_money = CreateClubRequest { price: -1, ..club_request() };
    assert!(validator.validate_create_club_request(&free_money).is_err());

    let ancient = CreateClubRequest { founded: 1066, ..club_request() };
    assert!(validator.validate_create_club_request(&ancient).is_err());

    let bad_average = CreateClubRequest { avg_goals_for: f64::NAN, ..club_request() };
    assert!(validator.validate_create_club_request(&bad_average).is_err());

    let unnamed = CreateClubRequest { name: "\0 ".into(), ..club_request() };
    assert!(validator.validate_create_club_request(&unnamed).is_err());

    assert!(validator.validate_update_club_request(&UpdateClubRequest::default()).is_ok());
    let update = UpdateClubRequest { possession_avg: Some(101), ..Default::default() };
    assert!(validator.validate_update_club_request(&update).is_err());
}

#[test]
fn test_validate_tournament_request() {
    let validator = LeagueValidator::new();
    let club = Uuid::new_v4();
    let request = CreateTournamentRequest {
        name: "Premier League".into(),
        country: "England".into(),
        logo: None,
        club_ids: vec![club, Uuid::new_v4()],
    };
    assert!(validator.validate_create_tournament_request(&request).is_ok());

    let duplicates = CreateTournamentRequest { club_ids: vec![club, club], ..request.clone() };
    assert!(validator.validate_create_tournament_request(&duplicates).is_err());

    let too_long = CreateTournamentRequest { name: "a".repeat(256), ..request };
    assert!(validator.validate_create_tournament_request(&too_long).is_err());
}

#[test]
fn test_sanitize_names() {
    let validator = LeagueValidator::new();

    assert_eq!(validator.sanitize_string_input("  Anfield\0 "), "Anfield");
    assert_eq!(
        validator.validate_and_sanitize_name("Stadium", "  Old Trafford  ", 255).unwrap(),
        "Old Trafford"
    );
    assert!(validator.validate_and_sanitize_name("Stadium", "", 255).is_err());
}
