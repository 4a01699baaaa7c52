use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::club::{Club, ClubSummary, CreateClubRequest, UpdateClubRequest};
use crate::models::tournament::ParticipationWithNames;

pub async fn insert_club<'e>(executor: impl PgExecutor<'e>, club: &CreateClubRequest) -> Result<Club, sqlx::Error> {
    sqlx::query_as::<_, Club>(
        r#"
        INSERT INTO clubs (
            id, name, country, town, price, emblem, founded, stadium,
            avg_goals_for, avg_goals_against, possession_avg
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&club.name)
    .bind(&club.country)
    .bind(&club.town)
    .bind(club.price)
    .bind(&club.emblem)
    .bind(club.founded)
    .bind(&club.stadium)
    .bind(club.avg_goals_for)
    .bind(club.avg_goals_against)
    .bind(club.possession_avg)
    .fetch_one(executor)
    .await
}

pub async fn get_club<'e>(executor: impl PgExecutor<'e>, club_id: Uuid) -> Result<Option<Club>, sqlx::Error> {
    sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE id = $1")
        .bind(club_id)
        .fetch_optional(executor)
        .await
}

/// Patch a club. Form columns are not editable here, they belong to the form refresh.
pub async fn update_club<'e>(
    executor: impl PgExecutor<'e>,
    club_id: Uuid,
    update: &UpdateClubRequest,
) -> Result<Option<Club>, sqlx::Error> {
    sqlx::query_as::<_, Club>(
        r#"
        UPDATE clubs SET
            name = COALESCE($2, name),
            country = COALESCE($3, country),
            town = COALESCE($4, town),
            price = COALESCE($5, price),
            emblem = COALESCE($6, emblem),
            founded = COALESCE($7, founded),
            stadium = COALESCE($8, stadium),
            avg_goals_for = COALESCE($9, avg_goals_for),
            avg_goals_against = COALESCE($10, avg_goals_against),
            possession_avg = COALESCE($11, possession_avg),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(club_id)
    .bind(&update.name)
    .bind(&update.country)
    .bind(&update.town)
    .bind(update.price)
    .bind(&update.emblem)
    .bind(update.founded)
    .bind(&update.stadium)
    .bind(update.avg_goals_for)
    .bind(update.avg_goals_against)
    .bind(update.possession_avg)
    .fetch_optional(executor)
    .await
}

pub async fn delete_club<'e>(executor: impl PgExecutor<'e>, club_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM clubs WHERE id = $1")
        .bind(club_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Matches that reference the club on either side
pub async fn count_club_matches<'e>(executor: impl PgExecutor<'e>, club_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM matches WHERE home_club_id = $1 OR away_club_id = $1")
        .bind(club_id)
        .fetch_one(executor)
        .await
}

/// Public club search by name or country. `None` lists every club.
pub async fn search_clubs<'e>(executor: impl PgExecutor<'e>, pattern: Option<&str>) -> Result<Vec<Club>, sqlx::Error> {
    sqlx::query_as::<_, Club>(
        r#"
        SELECT * FROM clubs
        WHERE $1::VARCHAR IS NULL OR name ILIKE $1 OR country ILIKE $1
        ORDER BY name, id
        "#,
    )
    .bind(pattern)
    .fetch_all(executor)
    .await
}

/// Admin listing with tournament and match counts, searchable by name, country or town
pub async fn list_club_summaries<'e>(
    executor: impl PgExecutor<'e>,
    pattern: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<ClubSummary>, sqlx::Error> {
    sqlx::query_as::<_, ClubSummary>(
        r#"
        SELECT c.id, c.name, c.country, c.town, c.emblem,
               (SELECT COUNT(*) FROM tournament_clubs tc WHERE tc.club_id = c.id) AS tournaments_count,
               (SELECT COUNT(*) FROM matches m WHERE m.home_club_id = c.id) AS home_matches_count,
               (SELECT COUNT(*) FROM matches m WHERE m.away_club_id = c.id) AS away_matches_count
        FROM clubs c
        WHERE $1::VARCHAR IS NULL OR c.name ILIKE $1 OR c.country ILIKE $1 OR c.town ILIKE $1
        ORDER BY c.name, c.id
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await
}

pub async fn club_participations<'e>(
    executor: impl PgExecutor<'e>,
    club_id: Uuid,
) -> Result<Vec<ParticipationWithNames>, sqlx::Error> {
    sqlx::query_as::<_, ParticipationWithNames>(
        r#"
        SELECT tc.id, tc.tournament_id, t.name AS tournament_name,
               tc.club_id, c.name AS club_name,
               tc.matches_played, tc.wins, tc.draws, tc.losses, tc.goals_for, tc.goals_against
        FROM tournament_clubs tc
        JOIN tournaments t ON t.id = tc.tournament_id
        JOIN clubs c ON c.id = tc.club_id
        WHERE tc.club_id = $1
        ORDER BY t.name
        "#,
    )
    .bind(club_id)
    .fetch_all(executor)
    .await
}

pub async fn all_club_ids<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM clubs ORDER BY name, id")
        .fetch_all(executor)
        .await
}

/// The subset of `club_ids` that exists
pub async fn existing_club_ids<'e>(executor: impl PgExecutor<'e>, club_ids: &[Uuid]) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM clubs WHERE id = ANY($1)")
        .bind(club_ids)
        .fetch_all(executor)
        .await
}
