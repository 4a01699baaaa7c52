//! Storage seam of the standings and form computations.
//!
//! `recompute_tournament` and `refresh_club_form` are generic over
//! [`LeagueStore`], so the same code runs against a pooled connection,
//! inside a transaction (`&mut *tx`) or against an in-memory store in tests.

use std::future::Future;

use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::club::ClubForm;
use crate::models::matches::{Match, MatchStatus};
use crate::models::tournament::{Participation, StatCounters};

pub trait LeagueStore: Send {
    /// Matches of one tournament, optionally restricted to one status
    fn fetch_matches(
        &mut self,
        tournament_id: Uuid,
        status: Option<MatchStatus>,
    ) -> impl Future<Output = Result<Vec<Match>, sqlx::Error>> + Send;

    fn fetch_participations(
        &mut self,
        tournament_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Participation>, sqlx::Error>> + Send;

    /// Overwrite the counters of a (tournament, club) pair, creating the row if needed
    fn upsert_participation(
        &mut self,
        tournament_id: Uuid,
        club_id: Uuid,
        counters: &StatCounters,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Matches where the club plays home or away, across all tournaments
    fn fetch_matches_for_club(
        &mut self,
        club_id: Uuid,
        status: Option<MatchStatus>,
    ) -> impl Future<Output = Result<Vec<Match>, sqlx::Error>> + Send;

    /// Persist the five form slots and the upcoming fixture flag.
    /// Fails with `RowNotFound` when the club does not exist.
    fn save_club_form(
        &mut self,
        club_id: Uuid,
        form: &ClubForm,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}

impl LeagueStore for PgConnection {
    async fn fetch_matches(
        &mut self,
        tournament_id: Uuid,
        status: Option<MatchStatus>,
    ) -> Result<Vec<Match>, sqlx::Error> {
        sqlx::query_as::<_, Match>(
            r#"
            SELECT * FROM matches
            WHERE tournament_id = $1
              AND ($2::VARCHAR IS NULL OR status = $2)
            ORDER BY kickoff_at, id
            "#,
        )
        .bind(tournament_id)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&mut *self)
        .await
    }

    async fn fetch_participations(
        &mut self,
        tournament_id: Uuid,
    ) -> Result<Vec<Participation>, sqlx::Error> {
        sqlx::query_as::<_, Participation>(
            r#"
            SELECT id, tournament_id, club_id, matches_played, wins, draws, losses,
                   goals_for, goals_against, updated_at
            FROM tournament_clubs
            WHERE tournament_id = $1
            ORDER BY club_id
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&mut *self)
        .await
    }

    async fn upsert_participation(
        &mut self,
        tournament_id: Uuid,
        club_id: Uuid,
        counters: &StatCounters,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO tournament_clubs (
                id, tournament_id, club_id, matches_played, wins, draws, losses,
                goals_for, goals_against, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
            ON CONFLICT (tournament_id, club_id) DO UPDATE SET
                matches_played = EXCLUDED.matches_played,
                wins = EXCLUDED.wins,
                draws = EXCLUDED.draws,
                losses = EXCLUDED.losses,
                goals_for = EXCLUDED.goals_for,
                goals_against = EXCLUDED.goals_against,
                updated_at = NOW()
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(tournament_id)
        .bind(club_id)
        .bind(counters.matches_played)
        .bind(counters.wins)
        .bind(counters.draws)
        .bind(counters.losses)
        .bind(counters.goals_for)
        .bind(counters.goals_against)
        .execute(&mut *self)
        .await?;
        Ok(())
    }

    async fn fetch_matches_for_club(
        &mut self,
        club_id: Uuid,
        status: Option<MatchStatus>,
    ) -> Result<Vec<Match>, sqlx::Error> {
        sqlx::query_as::<_, Match>(
            r#"
            SELECT * FROM matches
            WHERE (home_club_id = $1 OR away_club_id = $1)
              AND ($2::VARCHAR IS NULL OR status = $2)
            ORDER BY kickoff_at DESC, id
            "#,
        )
        .bind(club_id)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&mut *self)
        .await
    }

    async fn save_club_form(&mut self, club_id: Uuid, form: &ClubForm) -> Result<(), sqlx::Error> {
        let [form_1, form_2, form_3, form_4, form_5] = form.slots;
        let result = sqlx::query(
            r#"
            UPDATE clubs
            SET form_1 = $2, form_2 = $3, form_3 = $4, form_4 = $5, form_5 = $6,
                has_upcoming_fixture = $7, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(club_id)
        .bind(form_1.as_str())
        .bind(form_2.as_str())
        .bind(form_3.as_str())
        .bind(form_4.as_str())
        .bind(form_5.as_str())
        .bind(form.has_upcoming_fixture)
        .execute(&mut *self)
        .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }
}
