use reqwest::{Client, Method};
use serde_json::{json, Value};
use uuid::Uuid;

use football_league_backend::db::admin_queries::insert_admin;
use football_league_backend::utils::password::hash_password;

use crate::common::utils::{make_authenticated_request, TestApp};

/// Create an admin account in the test database and log in through the API
pub async fn create_admin_and_login(test_app: &TestApp) -> String {
    let username = format!("admin{}", &Uuid::new_v4().to_string()[..8]);
    let password = "password123";
    let password_hash = hash_password(password).expect("Failed to hash password");
    insert_admin(&test_app.db_pool, &username, &password_hash)
        .await
        .expect("Failed to insert admin");

    let response = Client::new()
        .post(&format!("{}/admin/login", test_app.address))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(200, response.status().as_u16());

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["data"]["token"].as_str().expect("Token not found").to_string()
}

pub fn parse_id(body: &Value, pointer: &str) -> Uuid {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .and_then(|id| Uuid::parse_str(id).ok())
        .unwrap_or_else(|| panic!("No id at {} in {}", pointer, body))
}

pub async fn create_club(test_app: &TestApp, token: &str, name: &str) -> Uuid {
    let response = make_authenticated_request(
        &Client::new(),
        Method::POST,
        &format!("{}/admin/clubs", test_app.address),
        token,
        Some(json!({
            "name": name,
            "country": "England",
            "town": format!("{} Town", name),
            "price": 1000000,
            "founded": 1900,
            "stadium": format!("{} Park", name),
            "avg_goals_for": 1.5,
            "avg_goals_against": 1.1,
            "possession_avg": 52
        })),
    )
    .await;
    assert_eq!(201, response.status().as_u16(), "Failed to create club {}", name);

    let body: Value = response.json().await.expect("Failed to parse club response");
    parse_id(&body, "/data/id")
}

pub async fn create_tournament(test_app: &TestApp, token: &str, name: &str, club_ids: &[Uuid]) -> Uuid {
    let response = make_authenticated_request(
        &Client::new(),
        Method::POST,
        &format!("{}/admin/tournaments", test_app.address),
        token,
        Some(json!({ "name": name, "country": "England", "club_ids": club_ids })),
    )
    .await;
    assert_eq!(201, response.status().as_u16(), "Failed to create tournament {}", name);

    let body: Value = response.json().await.expect("Failed to parse tournament response");
    parse_id(&body, "/data/tournament/id")
}

pub fn stats(home_goals: i32, away_goals: i32) -> Value {
    json!({
        "home_goals": home_goals,
        "away_goals": away_goals,
        "home_possession": 55,
        "away_possession": 45,
        "home_shots": 14,
        "away_shots": 9,
        "home_shots_on_target": home_goals + 2,
        "away_shots_on_target": away_goals + 1,
        "home_red_cards": 0,
        "away_red_cards": 0,
        "home_saves": away_goals + 1,
        "away_saves": 2
    })
}

/// Create a finished match; `day` offsets the kickoff from 1 September 2024
pub async fn create_finished_match(
    test_app: &TestApp,
    token: &str,
    tournament_id: Option<Uuid>,
    home_club_id: Uuid,
    away_club_id: Uuid,
    score: (i32, i32),
    day: u32,
) -> Uuid {
    let response = make_authenticated_request(
        &Client::new(),
        Method::POST,
        &format!("{}/admin/matches", test_app.address),
        token,
        Some(json!({
            "home_club_id": home_club_id,
            "away_club_id": away_club_id,
            "tournament_id": tournament_id,
            "kickoff_at": format!("2024-09-{:02}T15:00:00Z", day),
            "status": "finished",
            "stats": stats(score.0, score.1)
        })),
    )
    .await;
    assert_eq!(201, response.status().as_u16(), "Failed to create match");

    let body: Value = response.json().await.expect("Failed to parse match response");
    parse_id(&body, "/data/match/id")
}

/// Public tournament page payload
pub async fn get_tournament_page(test_app: &TestApp, tournament_id: Uuid) -> Value {
    let response = Client::new()
        .get(&format!("{}/tournaments/{}", test_app.address, tournament_id))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());

    let body: Value = response.json().await.expect("Failed to parse tournament page");
    body["data"].clone()
}

/// Standings line of one club on a tournament page
pub fn standing_of<'a>(page: &'a Value, club_id: Uuid) -> &'a Value {
    page["standings"]
        .as_array()
        .and_then(|rows| rows.iter().find(|row| row["club_id"] == club_id.to_string()))
        .unwrap_or_else(|| panic!("Club {} not in standings", club_id))
}
