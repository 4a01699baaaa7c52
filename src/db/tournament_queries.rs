use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use crate::models::tournament::{
    ParticipationWithNames, Tournament, TournamentSummary, UpdateTournamentRequest,
};

/// Where a participant plays its home fixtures
#[derive(Debug, FromRow, Clone)]
pub struct ParticipantVenue {
    pub club_id: Uuid,
    pub town: String,
    pub stadium: String,
}

const TOURNAMENT_SUMMARY: &str = r#"
    SELECT t.id, t.name, t.country, t.logo,
           (SELECT COUNT(*) FROM tournament_clubs tc WHERE tc.tournament_id = t.id) AS participants_count,
           (SELECT COUNT(*) FROM matches m WHERE m.tournament_id = t.id) AS matches_count
    FROM tournaments t
"#;

pub async fn insert_tournament<'e>(
    executor: impl PgExecutor<'e>,
    name: &str,
    country: &str,
    logo: Option<&str>,
) -> Result<Tournament, sqlx::Error> {
    sqlx::query_as::<_, Tournament>(
        r#"
        INSERT INTO tournaments (id, name, country, logo)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(country)
    .bind(logo)
    .fetch_one(executor)
    .await
}

pub async fn get_tournament<'e>(executor: impl PgExecutor<'e>, tournament_id: Uuid) -> Result<Option<Tournament>, sqlx::Error> {
    sqlx::query_as::<_, Tournament>("SELECT * FROM tournaments WHERE id = $1")
        .bind(tournament_id)
        .fetch_optional(executor)
        .await
}

pub async fn update_tournament<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
    update: &UpdateTournamentRequest,
) -> Result<Option<Tournament>, sqlx::Error> {
    sqlx::query_as::<_, Tournament>(
        r#"
        UPDATE tournaments SET
            name = COALESCE($2, name),
            country = COALESCE($3, country),
            logo = COALESCE($4, logo),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(tournament_id)
    .bind(&update.name)
    .bind(&update.country)
    .bind(&update.logo)
    .fetch_optional(executor)
    .await
}

/// Delete a tournament. Its matches stay, detached (`tournament_id` set to NULL).
pub async fn delete_tournament<'e>(executor: impl PgExecutor<'e>, tournament_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tournaments WHERE id = $1")
        .bind(tournament_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_tournament_summaries<'e>(
    executor: impl PgExecutor<'e>,
    pattern: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<TournamentSummary>, sqlx::Error> {
    let sql = format!(
        r#"{}
        WHERE $1::VARCHAR IS NULL OR t.name ILIKE $1 OR t.country ILIKE $1
        ORDER BY t.name, t.id
        LIMIT $2 OFFSET $3
        "#,
        TOURNAMENT_SUMMARY
    );
    sqlx::query_as::<_, TournamentSummary>(&sql)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await
}

pub async fn remove_participant<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
    club_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tournament_clubs WHERE tournament_id = $1 AND club_id = $2")
        .bind(tournament_id)
        .bind(club_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Participants in a stable order (club name, then id), with their home venue
pub async fn participant_venues<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
) -> Result<Vec<ParticipantVenue>, sqlx::Error> {
    sqlx::query_as::<_, ParticipantVenue>(
        r#"
        SELECT c.id AS club_id, c.town, c.stadium
        FROM tournament_clubs tc
        JOIN clubs c ON c.id = tc.club_id
        WHERE tc.tournament_id = $1
        ORDER BY c.name, c.id
        "#,
    )
    .bind(tournament_id)
    .fetch_all(executor)
    .await
}

pub async fn list_participations<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Option<Uuid>,
    club_id: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> Result<Vec<ParticipationWithNames>, sqlx::Error> {
    sqlx::query_as::<_, ParticipationWithNames>(
        r#"
        SELECT tc.id, tc.tournament_id, t.name AS tournament_name,
               tc.club_id, c.name AS club_name,
               tc.matches_played, tc.wins, tc.draws, tc.losses, tc.goals_for, tc.goals_against
        FROM tournament_clubs tc
        JOIN tournaments t ON t.id = tc.tournament_id
        JOIN clubs c ON c.id = tc.club_id
        WHERE ($1::UUID IS NULL OR tc.tournament_id = $1)
          AND ($2::UUID IS NULL OR tc.club_id = $2)
        ORDER BY t.name, c.name, tc.id
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(tournament_id)
    .bind(club_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await
}

/// Distinct tournaments owning the given participation rows
pub async fn tournaments_of_participations<'e>(
    executor: impl PgExecutor<'e>,
    participation_ids: &[Uuid],
) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT DISTINCT tournament_id FROM tournament_clubs WHERE id = ANY($1) ORDER BY tournament_id",
    )
    .bind(participation_ids)
    .fetch_all(executor)
    .await
}
