// src/models/tournament.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tournament listing row with participant and match counts
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TournamentSummary {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub logo: Option<String>,
    pub participants_count: i64,
    pub matches_count: i64,
}

/// Aggregate counters of one club in one tournament.
///
/// Points, goal difference and win percentage are derived on read.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatCounters {
    pub matches_played: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
}

impl StatCounters {
    /// 3 for a win, 1 for a draw
    pub fn points(&self) -> i32 {
        self.wins * 3 + self.draws
    }

    pub fn goal_difference(&self) -> i32 {
        self.goals_for - self.goals_against
    }

    /// Wins over matches played as a percentage, rounded half to even at 1 decimal
    pub fn win_percentage(&self) -> f64 {
        if self.matches_played > 0 {
            let pct = self.wins as f64 / self.matches_played as f64 * 100.0;
            (pct * 10.0).round_ties_even() / 10.0
        } else {
            0.0
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.matches_played == self.wins + self.draws + self.losses
    }

    /// Record one finished match with the given score from this side's perspective
    pub fn record(&mut self, goals_for: i32, goals_against: i32) {
        self.matches_played += 1;
        self.goals_for += goals_for;
        self.goals_against += goals_against;
        if goals_for > goals_against {
            self.wins += 1;
        } else if goals_for < goals_against {
            self.losses += 1;
        } else {
            self.draws += 1;
        }
    }
}

/// Participation of a club in a tournament (one row per pair)
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Participation {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub club_id: Uuid,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub counters: StatCounters,
    pub updated_at: DateTime<Utc>,
}

/// Participation joined with club and tournament names, for listings
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct ParticipationWithNames {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub tournament_name: String,
    pub club_id: Uuid,
    pub club_name: String,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub counters: StatCounters,
}

/// Participant row carrying what the standings table needs
#[derive(Debug, FromRow, Clone)]
pub struct StandingRow {
    pub club_id: Uuid,
    pub club_name: String,
    #[sqlx(flatten)]
    pub counters: StatCounters,
}

/// One ranked line of a tournament table
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StandingEntry {
    pub position: i32,
    pub club_id: Uuid,
    pub club_name: String,
    #[serde(flatten)]
    pub counters: StatCounters,
    pub points: i32,
    pub goal_difference: i32,
    pub win_percentage: f64,
}

impl StandingEntry {
    /// Unranked entry; `rank_standings` assigns the position
    pub fn new(club_id: Uuid, club_name: impl Into<String>, counters: StatCounters) -> Self {
        Self {
            position: 0,
            club_id,
            club_name: club_name.into(),
            counters,
            points: counters.points(),
            goal_difference: counters.goal_difference(),
            win_percentage: counters.win_percentage(),
        }
    }
}

impl From<StandingRow> for StandingEntry {
    fn from(row: StandingRow) -> Self {
        StandingEntry::new(row.club_id, row.club_name, row.counters)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecomputeStatus {
    Pending,
    Completed,
    Failed,
}

impl RecomputeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecomputeStatus::Pending => "pending",
            RecomputeStatus::Completed => "completed",
            RecomputeStatus::Failed => "failed",
        }
    }
}

impl From<String> for RecomputeStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "completed" => RecomputeStatus::Completed,
            "failed" => RecomputeStatus::Failed,
            _ => RecomputeStatus::Pending,
        }
    }
}

/// Outcome of the latest standings recompute of a tournament
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct StandingsRecompute {
    pub tournament_id: Uuid,
    #[sqlx(try_from = "String")]
    pub status: RecomputeStatus,
    pub processed_matches: i32,
    pub skipped_matches: i32,
    pub last_error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TournamentStandingsResponse {
    pub tournament: Tournament,
    pub standings: Vec<StandingEntry>,
    pub recompute: Option<StandingsRecompute>,
}

/// Sums over every participant of a tournament
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TournamentTotals {
    pub participants: i64,
    pub matches_played: i64,
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
    pub goals_for: i64,
    pub goals_against: i64,
}

/// Headline numbers of a tournament page
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TournamentMatchStats {
    pub participants: i64,
    pub finished_matches: i64,
    pub total_goals: i64,
    /// Rounded to 2 decimals, absent until a match is finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_goals_per_match: Option<f64>,
}

impl TournamentMatchStats {
    pub fn new(participants: i64, finished_matches: i64, total_goals: i64) -> Self {
        let avg_goals_per_match = (finished_matches > 0).then(|| {
            (total_goals as f64 / finished_matches as f64 * 100.0).round_ties_even() / 100.0
        });
        Self {
            participants,
            finished_matches,
            total_goals,
            avg_goals_per_match,
        }
    }
}

// Request/Response DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateTournamentRequest {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub logo: Option<String>,
    #[serde(default)]
    pub club_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdateTournamentRequest {
    pub name: Option<String>,
    pub country: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddParticipantRequest {
    pub club_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParticipationSelection {
    pub participation_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParticipationFilter {
    pub tournament_id: Option<Uuid>,
    pub club_id: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_values() {
        let counters = StatCounters {
            matches_played: 3,
            wins: 2,
            draws: 1,
            losses: 0,
            goals_for: 7,
            goals_against: 2,
        };
        assert_eq!(counters.points(), 7);
        assert_eq!(counters.goal_difference(), 5);
        assert_eq!(counters.win_percentage(), 66.7);
        assert!(counters.is_consistent());
    }

    #[test]
    fn test_win_percentage_rounds_halves_to_even() {
        let with_wins = |wins| StatCounters { matches_played: 16, wins, losses: 16 - wins, ..Default::default() };
        assert_eq!(with_wins(1).win_percentage(), 6.2);
        assert_eq!(with_wins(5).win_percentage(), 31.2);
        assert_eq!(with_wins(3).win_percentage(), 18.8);
    }

    #[test]
    fn test_win_percentage_without_matches() {
        assert_eq!(StatCounters::default().win_percentage(), 0.0);
    }

    #[test]
    fn test_record_keeps_counters_consistent() {
        let mut counters = StatCounters::default();
        counters.record(2, 1);
        counters.record(0, 0);
        counters.record(1, 4);
        assert_eq!(counters.matches_played, 3);
        assert_eq!((counters.wins, counters.draws, counters.losses), (1, 1, 1));
        assert_eq!((counters.goals_for, counters.goals_against), (3, 5));
        assert!(counters.is_consistent());
    }

    #[test]
    fn test_average_goals_rounding() {
        let stats = TournamentMatchStats::new(6, 3, 10);
        assert_eq!(stats.avg_goals_per_match, Some(3.33));
        assert_eq!(TournamentMatchStats::new(6, 0, 0).avg_goals_per_match, None);
        // 2.125 and 2.375 sit exactly on a half
        assert_eq!(TournamentMatchStats::new(6, 8, 17).avg_goals_per_match, Some(2.12));
        assert_eq!(TournamentMatchStats::new(6, 8, 19).avg_goals_per_match, Some(2.38));
    }
}
