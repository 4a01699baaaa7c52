// src/models/matches.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::club::FormResult;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Finished,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Finished => "finished",
        }
    }
}

impl From<String> for MatchStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "finished" => MatchStatus::Finished,
            _ => MatchStatus::Scheduled,
        }
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Match {
    pub id: Uuid,
    pub home_club_id: Uuid,
    pub away_club_id: Uuid,
    pub tournament_id: Option<Uuid>,
    pub town: String,
    pub stadium: String,
    pub kickoff_at: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: MatchStatus,
    pub home_goals: i32,
    pub away_goals: i32,
    pub home_possession: i32,
    pub away_possession: i32,
    pub home_shots: i32,
    pub away_shots: i32,
    pub home_shots_on_target: i32,
    pub away_shots_on_target: i32,
    pub home_red_cards: i32,
    pub away_red_cards: i32,
    pub home_saves: i32,
    pub away_saves: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    pub fn involves(&self, club_id: Uuid) -> bool {
        self.home_club_id == club_id || self.away_club_id == club_id
    }

    /// Result from `club_id`'s perspective. `None` when the match is not
    /// finished or the club did not play in it.
    pub fn outcome_for(&self, club_id: Uuid) -> Option<FormResult> {
        if !self.is_finished() {
            return None;
        }
        if self.home_club_id == club_id {
            Some(FormResult::from_score(self.home_goals, self.away_goals))
        } else if self.away_club_id == club_id {
            Some(FormResult::from_score(self.away_goals, self.home_goals))
        } else {
            None
        }
    }

    pub fn winner(&self) -> Option<MatchWinner> {
        if !self.is_finished() {
            return None;
        }
        Some(if self.home_goals > self.away_goals {
            MatchWinner::Home
        } else if self.home_goals < self.away_goals {
            MatchWinner::Away
        } else {
            MatchWinner::Draw
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchWinner {
    Home,
    Away,
    Draw,
}

/// Match with club and tournament names for listings and detail pages
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct MatchWithClubs {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub game: Match,
    pub home_club_name: String,
    pub away_club_name: String,
    pub tournament_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchDetailResponse {
    #[serde(flatten)]
    pub game: MatchWithClubs,
    pub winner: Option<MatchWinner>,
    pub total_shots: i32,
    pub total_shots_on_target: i32,
}

impl From<MatchWithClubs> for MatchDetailResponse {
    fn from(game: MatchWithClubs) -> Self {
        let winner = game.game.winner();
        let total_shots = game.game.home_shots + game.game.away_shots;
        let total_shots_on_target = game.game.home_shots_on_target + game.game.away_shots_on_target;
        Self {
            game,
            winner,
            total_shots,
            total_shots_on_target,
        }
    }
}

/// Side statistics as entered by an administrator
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct MatchStats {
    pub home_goals: i32,
    pub away_goals: i32,
    pub home_possession: i32,
    pub away_possession: i32,
    pub home_shots: i32,
    pub away_shots: i32,
    pub home_shots_on_target: i32,
    pub away_shots_on_target: i32,
    pub home_red_cards: i32,
    pub away_red_cards: i32,
    pub home_saves: i32,
    pub away_saves: i32,
}

impl Default for MatchStats {
    fn default() -> Self {
        Self {
            home_goals: 0,
            away_goals: 0,
            home_possession: 50,
            away_possession: 50,
            home_shots: 0,
            away_shots: 0,
            home_shots_on_target: 0,
            away_shots_on_target: 0,
            home_red_cards: 0,
            away_red_cards: 0,
            home_saves: 0,
            away_saves: 0,
        }
    }
}

impl From<&Match> for MatchStats {
    fn from(m: &Match) -> Self {
        Self {
            home_goals: m.home_goals,
            away_goals: m.away_goals,
            home_possession: m.home_possession,
            away_possession: m.away_possession,
            home_shots: m.home_shots,
            away_shots: m.away_shots,
            home_shots_on_target: m.home_shots_on_target,
            away_shots_on_target: m.away_shots_on_target,
            home_red_cards: m.home_red_cards,
            away_red_cards: m.away_red_cards,
            home_saves: m.home_saves,
            away_saves: m.away_saves,
        }
    }
}

/// A match ready to be inserted, produced by admin entry, fixture generation or seeding
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewMatch {
    pub home_club_id: Uuid,
    pub away_club_id: Uuid,
    pub tournament_id: Option<Uuid>,
    pub town: String,
    pub stadium: String,
    pub kickoff_at: DateTime<Utc>,
    pub status: MatchStatus,
    #[serde(flatten)]
    pub stats: MatchStats,
}

// Request/Response DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateMatchRequest {
    pub home_club_id: Uuid,
    pub away_club_id: Uuid,
    pub tournament_id: Option<Uuid>,
    /// Defaults to the home club's town
    pub town: Option<String>,
    /// Defaults to the home club's stadium
    pub stadium: Option<String>,
    pub kickoff_at: DateTime<Utc>,
    pub status: Option<MatchStatus>,
    #[serde(default)]
    pub stats: Option<MatchStats>,
}

/// Keeps an explicit `null` apart from a missing field
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdateMatchRequest {
    /// Missing keeps the current tournament, `null` detaches the match
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub tournament_id: Option<Option<Uuid>>,
    pub town: Option<String>,
    pub stadium: Option<String>,
    pub kickoff_at: Option<DateTime<Utc>>,
    pub status: Option<MatchStatus>,
    pub stats: Option<MatchStats>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkStatusRequest {
    pub match_ids: Vec<Uuid>,
    pub status: MatchStatus,
}

/// Round-robin fixture generation for a tournament's participants
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerateFixturesRequest {
    pub start: DateTime<Utc>,
    /// Days between consecutive fixtures, 7 when omitted
    pub spacing_days: Option<i64>,
    /// Add the return leg with home and away swapped
    #[serde(default)]
    pub double_round: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchFilter {
    pub status: Option<MatchStatus>,
    pub tournament_id: Option<Uuid>,
    pub club_id: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(home_goals: i32, away_goals: i32) -> Match {
        let now = Utc::now();
        Match {
            id: Uuid::new_v4(),
            home_club_id: Uuid::new_v4(),
            away_club_id: Uuid::new_v4(),
            tournament_id: None,
            town: "Town".into(),
            stadium: "Stadium".into(),
            kickoff_at: now,
            status: MatchStatus::Finished,
            home_goals,
            away_goals,
            home_possession: 50,
            away_possession: 50,
            home_shots: 10,
            away_shots: 8,
            home_shots_on_target: 4,
            away_shots_on_target: 3,
            home_red_cards: 0,
            away_red_cards: 0,
            home_saves: 2,
            away_saves: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_outcome_for_each_side() {
        let game = finished(3, 1);
        assert_eq!(game.outcome_for(game.home_club_id), Some(FormResult::Win));
        assert_eq!(game.outcome_for(game.away_club_id), Some(FormResult::Loss));
        assert_eq!(game.outcome_for(Uuid::new_v4()), None);
    }

    #[test]
    fn test_scheduled_match_has_no_outcome_or_winner() {
        let mut game = finished(1, 1);
        assert_eq!(game.winner(), Some(MatchWinner::Draw));
        game.status = MatchStatus::Scheduled;
        assert_eq!(game.winner(), None);
        assert_eq!(game.outcome_for(game.home_club_id), None);
    }

    #[test]
    fn test_update_request_distinguishes_null_from_missing_tournament() {
        let tournament_id = Uuid::new_v4();

        let missing: UpdateMatchRequest = serde_json::from_str(r#"{"town":"Leeds"}"#).unwrap();
        assert_eq!(missing.tournament_id, None);

        let detached: UpdateMatchRequest = serde_json::from_str(r#"{"tournament_id":null}"#).unwrap();
        assert_eq!(detached.tournament_id, Some(None));

        let moved: UpdateMatchRequest =
            serde_json::from_value(serde_json::json!({ "tournament_id": tournament_id })).unwrap();
        assert_eq!(moved.tournament_id, Some(Some(tournament_id)));
    }
}
