// src/models/club.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Number of recent results kept per club
pub const FORM_SLOTS: usize = 5;

/// Outcome of a finished match from one club's point of view.
/// `NoResult` fills the slots a club has not played yet.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormResult {
    #[default]
    #[serde(rename = "none")]
    NoResult,
    Loss,
    Draw,
    Win,
}

impl FormResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormResult::NoResult => "none",
            FormResult::Loss => "loss",
            FormResult::Draw => "draw",
            FormResult::Win => "win",
        }
    }

    /// Classify a score line from the perspective of the club that scored `goals_for`
    pub fn from_score(goals_for: i32, goals_against: i32) -> Self {
        if goals_for > goals_against {
            FormResult::Win
        } else if goals_for < goals_against {
            FormResult::Loss
        } else {
            FormResult::Draw
        }
    }
}

impl From<String> for FormResult {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "win" => FormResult::Win,
            "draw" => FormResult::Draw,
            "loss" => FormResult::Loss,
            _ => FormResult::NoResult,
        }
    }
}

/// Recent form of a club: most recent result first, plus the fixture flag
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClubForm {
    pub slots: [FormResult; FORM_SLOTS],
    pub has_upcoming_fixture: bool,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Club {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub town: String,
    pub price: i64,
    pub emblem: Option<String>,
    pub founded: i32,
    pub stadium: String,
    pub avg_goals_for: f64,
    pub avg_goals_against: f64,
    pub possession_avg: i32,
    #[sqlx(try_from = "String")]
    pub form_1: FormResult,
    #[sqlx(try_from = "String")]
    pub form_2: FormResult,
    #[sqlx(try_from = "String")]
    pub form_3: FormResult,
    #[sqlx(try_from = "String")]
    pub form_4: FormResult,
    #[sqlx(try_from = "String")]
    pub form_5: FormResult,
    pub has_upcoming_fixture: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Club {
    /// Stored form, most recent result first
    pub fn form(&self) -> ClubForm {
        ClubForm {
            slots: [self.form_1, self.form_2, self.form_3, self.form_4, self.form_5],
            has_upcoming_fixture: self.has_upcoming_fixture,
        }
    }
}

/// Club listing row used by the admin screens
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct ClubSummary {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub town: String,
    pub emblem: Option<String>,
    pub tournaments_count: i64,
    pub home_matches_count: i64,
    pub away_matches_count: i64,
}

// Request/Response DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateClubRequest {
    pub name: String,
    pub country: String,
    pub town: String,
    pub price: i64,
    pub emblem: Option<String>,
    pub founded: i32,
    pub stadium: String,
    #[serde(default)]
    pub avg_goals_for: f64,
    #[serde(default)]
    pub avg_goals_against: f64,
    #[serde(default)]
    pub possession_avg: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdateClubRequest {
    pub name: Option<String>,
    pub country: Option<String>,
    pub town: Option<String>,
    pub price: Option<i64>,
    pub emblem: Option<String>,
    pub founded: Option<i32>,
    pub stadium: Option<String>,
    pub avg_goals_for: Option<f64>,
    pub avg_goals_against: Option<f64>,
    pub possession_avg: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClubSearchQuery {
    pub q: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_result_from_score() {
        assert_eq!(FormResult::from_score(3, 1), FormResult::Win);
        assert_eq!(FormResult::from_score(0, 2), FormResult::Loss);
        assert_eq!(FormResult::from_score(2, 2), FormResult::Draw);
    }

    #[test]
    fn test_form_result_string_round_trip() {
        for result in [FormResult::NoResult, FormResult::Loss, FormResult::Draw, FormResult::Win] {
            assert_eq!(FormResult::from(result.as_str().to_string()), result);
        }
        assert_eq!(FormResult::from("garbage".to_string()), FormResult::NoResult);
        assert_eq!(serde_json::to_string(&FormResult::NoResult).unwrap(), "\"none\"");
    }
}
