use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::matches::{Match, MatchStatus, MatchWithClubs, NewMatch};

const MATCH_WITH_CLUBS: &str = r#"
    SELECT m.*,
           hc.name AS home_club_name,
           ac.name AS away_club_name,
           t.name AS tournament_name
    FROM matches m
    JOIN clubs hc ON hc.id = m.home_club_id
    JOIN clubs ac ON ac.id = m.away_club_id
    LEFT JOIN tournaments t ON t.id = m.tournament_id
"#;

pub async fn insert_match<'e>(executor: impl PgExecutor<'e>, game: &NewMatch) -> Result<Match, sqlx::Error> {
    let stats = &game.stats;
    sqlx::query_as::<_, Match>(
        r#"
        INSERT INTO matches (
            id, home_club_id, away_club_id, tournament_id, town, stadium, kickoff_at, status,
            home_goals, away_goals, home_possession, away_possession,
            home_shots, away_shots, home_shots_on_target, away_shots_on_target,
            home_red_cards, away_red_cards, home_saves, away_saves
        ) VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8,
            $9, $10, $11, $12,
            $13, $14, $15, $16,
            $17, $18, $19, $20
        )
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(game.home_club_id)
    .bind(game.away_club_id)
    .bind(game.tournament_id)
    .bind(&game.town)
    .bind(&game.stadium)
    .bind(game.kickoff_at)
    .bind(game.status.as_str())
    .bind(stats.home_goals)
    .bind(stats.away_goals)
    .bind(stats.home_possession)
    .bind(stats.away_possession)
    .bind(stats.home_shots)
    .bind(stats.away_shots)
    .bind(stats.home_shots_on_target)
    .bind(stats.away_shots_on_target)
    .bind(stats.home_red_cards)
    .bind(stats.away_red_cards)
    .bind(stats.home_saves)
    .bind(stats.away_saves)
    .fetch_one(executor)
    .await
}

/// Overwrite every editable column of a match with `game`
pub async fn update_match<'e>(
    executor: impl PgExecutor<'e>,
    match_id: Uuid,
    game: &NewMatch,
) -> Result<Option<Match>, sqlx::Error> {
    let stats = &game.stats;
    sqlx::query_as::<_, Match>(
        r#"
        UPDATE matches SET
            home_club_id = $2, away_club_id = $3, tournament_id = $4,
            town = $5, stadium = $6, kickoff_at = $7, status = $8,
            home_goals = $9, away_goals = $10, home_possession = $11, away_possession = $12,
            home_shots = $13, away_shots = $14, home_shots_on_target = $15, away_shots_on_target = $16,
            home_red_cards = $17, away_red_cards = $18, home_saves = $19, away_saves = $20,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(match_id)
    .bind(game.home_club_id)
    .bind(game.away_club_id)
    .bind(game.tournament_id)
    .bind(&game.town)
    .bind(&game.stadium)
    .bind(game.kickoff_at)
    .bind(game.status.as_str())
    .bind(stats.home_goals)
    .bind(stats.away_goals)
    .bind(stats.home_possession)
    .bind(stats.away_possession)
    .bind(stats.home_shots)
    .bind(stats.away_shots)
    .bind(stats.home_shots_on_target)
    .bind(stats.away_shots_on_target)
    .bind(stats.home_red_cards)
    .bind(stats.away_red_cards)
    .bind(stats.home_saves)
    .bind(stats.away_saves)
    .fetch_optional(executor)
    .await
}

pub async fn get_match<'e>(executor: impl PgExecutor<'e>, match_id: Uuid) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = $1")
        .bind(match_id)
        .fetch_optional(executor)
        .await
}

pub async fn get_match_with_clubs<'e>(
    executor: impl PgExecutor<'e>,
    match_id: Uuid,
) -> Result<Option<MatchWithClubs>, sqlx::Error> {
    let sql = format!("{} WHERE m.id = $1", MATCH_WITH_CLUBS);
    sqlx::query_as::<_, MatchWithClubs>(&sql)
        .bind(match_id)
        .fetch_optional(executor)
        .await
}

/// Admin listing, newest first
pub async fn list_matches<'e>(
    executor: impl PgExecutor<'e>,
    status: Option<MatchStatus>,
    tournament_id: Option<Uuid>,
    club_id: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> Result<Vec<MatchWithClubs>, sqlx::Error> {
    let sql = format!(
        r#"{}
        WHERE ($1::VARCHAR IS NULL OR m.status = $1)
          AND ($2::UUID IS NULL OR m.tournament_id = $2)
          AND ($3::UUID IS NULL OR m.home_club_id = $3 OR m.away_club_id = $3)
        ORDER BY m.kickoff_at DESC, m.id
        LIMIT $4 OFFSET $5
        "#,
        MATCH_WITH_CLUBS
    );
    sqlx::query_as::<_, MatchWithClubs>(&sql)
        .bind(status.map(|s| s.as_str()))
        .bind(tournament_id)
        .bind(club_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await
}

/// Home page match search by home and/or away club name patterns, newest first
pub async fn search_matches<'e>(
    executor: impl PgExecutor<'e>,
    home_pattern: Option<&str>,
    away_pattern: Option<&str>,
) -> Result<Vec<MatchWithClubs>, sqlx::Error> {
    let sql = format!(
        r#"{}
        WHERE ($1::VARCHAR IS NULL OR hc.name ILIKE $1)
          AND ($2::VARCHAR IS NULL OR ac.name ILIKE $2)
        ORDER BY m.kickoff_at DESC, m.id
        "#,
        MATCH_WITH_CLUBS
    );
    sqlx::query_as::<_, MatchWithClubs>(&sql)
        .bind(home_pattern)
        .bind(away_pattern)
        .fetch_all(executor)
        .await
}

pub async fn list_tournament_matches<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
) -> Result<Vec<MatchWithClubs>, sqlx::Error> {
    let sql = format!(
        "{} WHERE m.tournament_id = $1 ORDER BY m.kickoff_at DESC, m.id",
        MATCH_WITH_CLUBS
    );
    sqlx::query_as::<_, MatchWithClubs>(&sql)
        .bind(tournament_id)
        .fetch_all(executor)
        .await
}

pub async fn delete_match<'e>(executor: impl PgExecutor<'e>, match_id: Uuid) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>("DELETE FROM matches WHERE id = $1 RETURNING *")
        .bind(match_id)
        .fetch_optional(executor)
        .await
}

/// Change the status of several matches at once. Scores are left as stored,
/// so a match finished without a result counts as 0-0.
pub async fn set_match_status<'e>(
    executor: impl PgExecutor<'e>,
    match_ids: &[Uuid],
    status: MatchStatus,
) -> Result<Vec<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        r#"
        UPDATE matches SET status = $2, updated_at = NOW()
        WHERE id = ANY($1)
        RETURNING *
        "#,
    )
    .bind(match_ids)
    .bind(status.as_str())
    .fetch_all(executor)
    .await
}

/// Number of finished matches and goals scored in them
pub async fn finished_match_totals<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
) -> Result<(i64, i64), sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT COUNT(*), COALESCE(SUM(home_goals + away_goals), 0)::BIGINT
        FROM matches
        WHERE tournament_id = $1 AND status = 'finished'
        "#,
    )
    .bind(tournament_id)
    .fetch_one(executor)
    .await
}
