use chrono::Duration;
use uuid::Uuid;

use football_league_backend::league::form::{recent_finished_matches, refresh_club_form, summarize_form};
use football_league_backend::models::club::FormResult::{self, Draw, Loss, NoResult, Win};

mod common;
use common::in_memory_store::{base_time, days_after_base, finished_match, scheduled_match, InMemoryStore};

#[tokio::test]
async fn test_form_uses_five_most_recent_results_home_and_away() {
    let mut store = InMemoryStore::new();
    let tournament_id = Uuid::new_v4();
    let club = store.add_club();
    let other = store.add_club();

    // Oldest two fall outside the window
    store.add_match(finished_match(tournament_id, club, other, 5, 0, days_after_base(0)));
    store.add_match(finished_match(tournament_id, other, club, 0, 5, days_after_base(7)));
    // Window, oldest first: W (home), L (away), D (home), W (away), L (home)
    store.add_match(finished_match(tournament_id, club, other, 2, 0, days_after_base(14)));
    store.add_match(finished_match(tournament_id, other, club, 3, 1, days_after_base(21)));
    store.add_match(finished_match(tournament_id, club, other, 1, 1, days_after_base(28)));
    store.add_match(finished_match(tournament_id, other, club, 0, 2, days_after_base(35)));
    store.add_match(finished_match(tournament_id, club, other, 0, 1, days_after_base(42)));

    let form = refresh_club_form(&mut store, club, days_after_base(50)).await.unwrap();

    assert_eq!(form.slots, [Loss, Win, Draw, Loss, Win]);
    assert!(!form.has_upcoming_fixture);
    assert_eq!(store.forms[&club], form);
}

#[tokio::test]
async fn test_form_ignores_other_clubs_and_spans_tournaments() {
    let mut store = InMemoryStore::new();
    let club = store.add_club();
    let (x, y) = (store.add_club(), store.add_club());

    store.add_match(finished_match(Uuid::new_v4(), club, x, 2, 1, days_after_base(1)));
    store.add_match(finished_match(Uuid::new_v4(), y, club, 2, 2, days_after_base(2)));
    store.add_match(finished_match(Uuid::new_v4(), x, y, 4, 0, days_after_base(3)));

    let form = refresh_club_form(&mut store, club, days_after_base(10)).await.unwrap();
    assert_eq!(form.slots, [Draw, Win, NoResult, NoResult, NoResult]);
}

#[test]
fn test_upcoming_fixture_flag_depends_on_evaluation_instant() {
    let club = Uuid::new_v4();
    let kickoff = days_after_base(3);
    let matches = vec![scheduled_match(Uuid::new_v4(), club, Uuid::new_v4(), kickoff)];

    let before = summarize_form(club, &matches, base_time());
    assert!(before.has_upcoming_fixture);
    assert_eq!(before.slots, [NoResult; 5]);

    // Still scheduled, but its kickoff has passed
    let after = summarize_form(club, &matches, kickoff + Duration::hours(2));
    assert!(!after.has_upcoming_fixture);

    let at_kickoff = summarize_form(club, &matches, kickoff);
    assert!(!at_kickoff.has_upcoming_fixture);
}

#[test]
fn test_equal_kickoffs_are_ordered_by_match_id() {
    let club = Uuid::new_v4();
    let other = Uuid::new_v4();
    let tournament_id = Uuid::new_v4();
    let kickoff = days_after_base(5);

    let mut win = finished_match(tournament_id, club, other, 1, 0, kickoff);
    let mut loss = finished_match(tournament_id, club, other, 0, 1, kickoff);
    win.id = Uuid::from_u128(1);
    loss.id = Uuid::from_u128(2);

    let expected: [FormResult; 5] = [Win, Loss, NoResult, NoResult, NoResult];
    assert_eq!(summarize_form(club, &[loss.clone(), win.clone()], base_time()).slots, expected);
    assert_eq!(summarize_form(club, &[win, loss], base_time()).slots, expected);
}

#[test]
fn test_recent_finished_matches_skips_scheduled() {
    let club = Uuid::new_v4();
    let other = Uuid::new_v4();
    let tournament_id = Uuid::new_v4();

    let matches = vec![
        finished_match(tournament_id, club, other, 1, 0, days_after_base(1)),
        scheduled_match(tournament_id, club, other, days_after_base(2)),
        finished_match(tournament_id, other, club, 1, 0, days_after_base(3)),
    ];

    let recent = recent_finished_matches(club, &matches, 5);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, matches[2].id);
    assert_eq!(recent[1].id, matches[0].id);

    assert_eq!(recent_finished_matches(club, &matches, 1).len(), 1);
}

#[tokio::test]
async fn test_refresh_unknown_club_fails() {
    let mut store = InMemoryStore::new();
    let result = refresh_club_form(&mut store, Uuid::new_v4(), base_time()).await;
    assert!(matches!(result, Err(sqlx::Error::RowNotFound)));
}
