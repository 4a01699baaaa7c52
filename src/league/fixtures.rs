use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::require_found;
use crate::db::match_queries::insert_match;
use crate::db::tournament_queries::{get_tournament, participant_venues};
use crate::league::error::LeagueError;
use crate::models::matches::{GenerateFixturesRequest, Match, MatchStats, MatchStatus, NewMatch};

/// One pairing produced by the round robin
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    pub home_club_id: Uuid,
    pub away_club_id: Uuid,
    pub kickoff_at: DateTime<Utc>,
}

/// Pair every club with every other club once, the earlier club at home.
///
/// Kickoffs start at `start` and advance by `spacing` per fixture. With
/// `double_round` a second leg follows with home and away swapped.
pub fn generate_round_robin(
    club_ids: &[Uuid],
    start: DateTime<Utc>,
    spacing: Duration,
    double_round: bool,
) -> Vec<Fixture> {
    let mut pairs = Vec::new();
    for i in 0..club_ids.len() {
        for j in (i + 1)..club_ids.len() {
            pairs.push((club_ids[i], club_ids[j]));
        }
    }

    let second_leg: Vec<(Uuid, Uuid)> = if double_round {
        pairs.iter().map(|&(home, away)| (away, home)).collect()
    } else {
        Vec::new()
    };

    let mut kickoff_at = start;
    let mut fixtures = Vec::with_capacity(pairs.len() + second_leg.len());
    for (home_club_id, away_club_id) in pairs.into_iter().chain(second_leg) {
        fixtures.push(Fixture { home_club_id, away_club_id, kickoff_at });
        kickoff_at += spacing;
    }
    fixtures
}

/// Service creating scheduled matches for a tournament
pub struct FixtureService {
    pool: PgPool,
}

impl FixtureService {
    pub const DEFAULT_SPACING_DAYS: i64 = 7;

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Generate and insert a round robin between the tournament's participants.
    /// Matches are played at the home club's town and stadium.
    pub async fn generate(
        &self,
        tournament_id: Uuid,
        request: &GenerateFixturesRequest,
    ) -> Result<Vec<Match>, LeagueError> {
        let spacing_days = request.spacing_days.unwrap_or(Self::DEFAULT_SPACING_DAYS);
        if !(1..=60).contains(&spacing_days) {
            return Err(LeagueError::invariant(format!(
                "Spacing must be between 1 and 60 days, got {}",
                spacing_days
            )));
        }

        require_found(get_tournament(&self.pool, tournament_id).await?, "Tournament", tournament_id)?;

        let venues = participant_venues(&self.pool, tournament_id).await?;
        if venues.len() < 2 {
            return Err(LeagueError::invariant(format!(
                "Minimum 2 participants required to generate fixtures, got {}",
                venues.len()
            )));
        }

        let club_ids: Vec<Uuid> = venues.iter().map(|v| v.club_id).collect();
        let fixtures = generate_round_robin(
            &club_ids,
            request.start,
            Duration::days(spacing_days),
            request.double_round,
        );

        tracing::info!(
            "Generating {} fixtures for tournament {} ({} clubs)",
            fixtures.len(),
            tournament_id,
            club_ids.len()
        );

        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(fixtures.len());

        for fixture in fixtures {
            let Some(venue) = venues.iter().find(|v| v.club_id == fixture.home_club_id) else {
                continue;
            };
            let game = NewMatch {
                home_club_id: fixture.home_club_id,
                away_club_id: fixture.away_club_id,
                tournament_id: Some(tournament_id),
                town: venue.town.clone(),
                stadium: venue.stadium.clone(),
                kickoff_at: fixture.kickoff_at,
                status: MatchStatus::Scheduled,
                stats: MatchStats::default(),
            };
            created.push(insert_match(&mut *tx, &game).await?);
        }

        tx.commit().await?;
        Ok(created)
    }
}
