use std::collections::HashSet;
use uuid::Uuid;

use crate::league::error::LeagueError;
use crate::models::club::{CreateClubRequest, UpdateClubRequest};
use crate::models::matches::{MatchStats, NewMatch};
use crate::models::tournament::CreateTournamentRequest;

/// Centralized validation for league data entering the store
pub struct LeagueValidator;

impl LeagueValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a match before it is inserted or updated
    pub fn validate_new_match(&self, game: &NewMatch) -> Result<(), LeagueError> {
        self.validate_opponents(game.home_club_id, game.away_club_id)?;
        self.validate_match_stats(&game.stats)?;
        self.validate_and_sanitize_name("Town", &game.town, 100)?;
        self.validate_and_sanitize_name("Stadium", &game.stadium, 255)?;
        Ok(())
    }

    /// A club cannot play itself
    pub fn validate_opponents(&self, home_club_id: Uuid, away_club_id: Uuid) -> Result<(), LeagueError> {
        if home_club_id.is_nil() || away_club_id.is_nil() {
            return Err(LeagueError::invariant("Nil UUID not allowed for club ID"));
        }
        if home_club_id == away_club_id {
            return Err(LeagueError::invariant(format!(
                "Home and away club must differ (both are {})",
                home_club_id
            )));
        }
        Ok(())
    }

    pub fn validate_match_stats(&self, stats: &MatchStats) -> Result<(), LeagueError> {
        self.validate_scores(stats.home_goals, stats.away_goals)?;

        if !(0..=100).contains(&stats.home_possession) || !(0..=100).contains(&stats.away_possession) {
            return Err(LeagueError::invariant("Possession must be between 0 and 100"));
        }
        if stats.home_possession + stats.away_possession != 100 {
            return Err(LeagueError::invariant(format!(
                "Possession must sum to 100, got {} + {}",
                stats.home_possession, stats.away_possession
            )));
        }

        let counts = [
            ("home_shots", stats.home_shots),
            ("away_shots", stats.away_shots),
            ("home_shots_on_target", stats.home_shots_on_target),
            ("away_shots_on_target", stats.away_shots_on_target),
            ("home_red_cards", stats.home_red_cards),
            ("away_red_cards", stats.away_red_cards),
            ("home_saves", stats.home_saves),
            ("away_saves", stats.away_saves),
        ];
        for (field, value) in counts {
            if value < 0 {
                return Err(LeagueError::invariant(format!("{} cannot be negative: {}", field, value)));
            }
        }

        if stats.home_shots_on_target > stats.home_shots {
            return Err(LeagueError::invariant("Home shots on target exceed home shots"));
        }
        if stats.away_shots_on_target > stats.away_shots {
            return Err(LeagueError::invariant("Away shots on target exceed away shots"));
        }

        Ok(())
    }

    /// Validate match scores
    pub fn validate_scores(&self, home_goals: i32, away_goals: i32) -> Result<(), LeagueError> {
        if home_goals < 0 {
            return Err(LeagueError::invariant(format!("Home goals cannot be negative: {}", home_goals)));
        }
        if away_goals < 0 {
            return Err(LeagueError::invariant(format!("Away goals cannot be negative: {}", away_goals)));
        }

        // Reasonable upper limit (catches obvious data entry errors)
        const MAX_REASONABLE_GOALS: i32 = 50;
        if home_goals > MAX_REASONABLE_GOALS || away_goals > MAX_REASONABLE_GOALS {
            return Err(LeagueError::invariant(format!(
                "Score {}-{} too high (max {})",
                home_goals, away_goals, MAX_REASONABLE_GOALS
            )));
        }

        Ok(())
    }

    pub fn validate_create_club_request(&self, request: &CreateClubRequest) -> Result<(), LeagueError> {
        self.validate_and_sanitize_name("Club name", &request.name, 255)?;
        self.validate_and_sanitize_name("Country", &request.country, 100)?;
        self.validate_and_sanitize_name("Town", &request.town, 100)?;
        self.validate_and_sanitize_name("Stadium", &request.stadium, 255)?;
        self.validate_club_numbers(
            Some(request.price),
            Some(request.founded),
            Some(request.avg_goals_for),
            Some(request.avg_goals_against),
            Some(request.possession_avg),
        )
    }

    pub fn validate_update_club_request(&self, request: &UpdateClubRequest) -> Result<(), LeagueError> {
        let names = [
            ("Club name", request.name.as_deref(), 255),
            ("Country", request.country.as_deref(), 100),
            ("Town", request.town.as_deref(), 100),
            ("Stadium", request.stadium.as_deref(), 255),
        ];
        for (label, value, max_len) in names {
            if let Some(value) = value {
                self.validate_and_sanitize_name(label, value, max_len)?;
            }
        }
        self.validate_club_numbers(
            request.price,
            request.founded,
            request.avg_goals_for,
            request.avg_goals_against,
            request.possession_avg,
        )
    }

    fn validate_club_numbers(
        &self,
        price: Option<i64>,
        founded: Option<i32>,
        avg_goals_for: Option<f64>,
        avg_goals_against: Option<f64>,
        possession_avg: Option<i32>,
    ) -> Result<(), LeagueError> {
        if price.is_some_and(|p| p < 0) {
            return Err(LeagueError::invariant("Price cannot be negative"));
        }
        if founded.is_some_and(|year| !(1800..=2100).contains(&year)) {
            return Err(LeagueError::invariant("Founding year must be between 1800 and 2100"));
        }
        for avg in [avg_goals_for, avg_goals_against].into_iter().flatten() {
            if !avg.is_finite() || avg < 0.0 {
                return Err(LeagueError::invariant("Goal averages must be non-negative numbers"));
            }
        }
        if possession_avg.is_some_and(|p| !(0..=100).contains(&p)) {
            return Err(LeagueError::invariant("Possession average must be between 0 and 100"));
        }
        Ok(())
    }

    pub fn validate_create_tournament_request(&self, request: &CreateTournamentRequest) -> Result<(), LeagueError> {
        self.validate_and_sanitize_name("Tournament name", &request.name, 255)?;
        self.validate_club_ids(&request.club_ids, 0)
    }

    /// Validate club IDs: no duplicates, no nil IDs, at least `min` entries
    pub fn validate_club_ids(&self, club_ids: &[Uuid], min: usize) -> Result<(), LeagueError> {
        if club_ids.len() < min {
            return Err(LeagueError::invariant(format!(
                "Minimum {} clubs required, got {}",
                min,
                club_ids.len()
            )));
        }

        let mut unique_clubs = HashSet::new();
        for club_id in club_ids {
            if club_id.is_nil() {
                return Err(LeagueError::invariant("Nil UUID not allowed for club ID"));
            }
            if !unique_clubs.insert(club_id) {
                return Err(LeagueError::invariant(format!("Duplicate club ID found: {}", club_id)));
            }
        }

        Ok(())
    }

    /// Strip null bytes and surrounding whitespace
    pub fn sanitize_string_input(&self, input: &str) -> String {
        input
            .trim()
            .chars()
            .filter(|&c| c != '\0')
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Validate and sanitize a display name
    pub fn validate_and_sanitize_name(&self, label: &str, name: &str, max_len: usize) -> Result<String, LeagueError> {
        let sanitized = self.sanitize_string_input(name);

        if sanitized.is_empty() {
            return Err(LeagueError::invariant(format!("{} cannot be empty", label)));
        }

        if sanitized.chars().count() > max_len {
            return Err(LeagueError::invariant(format!(
                "{} too long (max {} characters)",
                label, max_len
            )));
        }

        Ok(sanitized)
    }
}

impl Default for LeagueValidator {
    fn default() -> Self {
        Self::new()
    }
}
