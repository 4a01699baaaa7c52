use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::club_queries::get_club;
use crate::db::helpers::require_found;
use crate::db::match_queries::{
    delete_match as delete_match_row, get_match, insert_match, list_matches, set_match_status,
    update_match as update_match_row,
};
use crate::db::tournament_queries::get_tournament;
use crate::league::error::LeagueError;
use crate::league::league::{AffectedEntities, LeagueService, MatchChangeSummary};
use crate::league::validation::LeagueValidator;
use crate::models::common::{ApiResponse, PaginationQuery};
use crate::models::matches::{
    BulkStatusRequest, CreateMatchRequest, Match, MatchFilter, MatchStatus, MatchStats, NewMatch,
    UpdateMatchRequest,
};

#[derive(Debug, Serialize)]
pub struct MatchChangeResponse {
    #[serde(rename = "match")]
    pub game: Match,
    pub applied: MatchChangeSummary,
}

#[derive(Debug, Serialize)]
pub struct BulkStatusResponse {
    pub updated: Vec<Uuid>,
    pub applied: MatchChangeSummary,
}

async fn require_tournament(pool: &PgPool, tournament_id: Option<Uuid>) -> Result<(), LeagueError> {
    if let Some(tournament_id) = tournament_id {
        require_found(get_tournament(pool, tournament_id).await?, "Tournament", tournament_id)?;
    }
    Ok(())
}

fn sanitize_venue(validator: &LeagueValidator, game: &mut NewMatch) {
    game.town = validator.sanitize_string_input(&game.town);
    game.stadium = validator.sanitize_string_input(&game.stadium);
}

// GET /admin/matches - List matches, filtered by status, tournament or club
pub async fn get_matches(
    pool: web::Data<PgPool>,
    query: web::Query<MatchFilter>,
) -> Result<HttpResponse, LeagueError> {
    let (limit, offset) = PaginationQuery { page: query.page, limit: query.limit }.limit_offset();

    let matches = list_matches(
        pool.get_ref(),
        query.status,
        query.tournament_id,
        query.club_id,
        limit,
        offset,
    )
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Matches retrieved", matches)))
}

// POST /admin/matches - Create a match
#[tracing::instrument(
    name = "Admin create match",
    skip(pool, body),
    fields(home = %body.home_club_id, away = %body.away_club_id)
)]
pub async fn create_match(
    pool: web::Data<PgPool>,
    body: web::Json<CreateMatchRequest>,
) -> Result<HttpResponse, LeagueError> {
    let request = body.into_inner();
    let validator = LeagueValidator::new();
    validator.validate_opponents(request.home_club_id, request.away_club_id)?;

    let home = require_found(get_club(pool.get_ref(), request.home_club_id).await?, "Club", request.home_club_id)?;
    require_found(get_club(pool.get_ref(), request.away_club_id).await?, "Club", request.away_club_id)?;
    require_tournament(pool.get_ref(), request.tournament_id).await?;

    let mut game = NewMatch {
        home_club_id: request.home_club_id,
        away_club_id: request.away_club_id,
        tournament_id: request.tournament_id,
        town: request.town.unwrap_or(home.town),
        stadium: request.stadium.unwrap_or(home.stadium),
        kickoff_at: request.kickoff_at,
        status: request.status.unwrap_or(MatchStatus::Scheduled),
        stats: request.stats.unwrap_or_default(),
    };
    sanitize_venue(&validator, &mut game);
    validator.validate_new_match(&game)?;

    let created = insert_match(pool.get_ref(), &game).await?;
    tracing::info!("Created match {}", created.id);

    let applied = LeagueService::new(pool.get_ref().clone())
        .apply_match_changes(&AffectedEntities::from_matches([&created]))
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Match created",
        MatchChangeResponse { game: created, applied },
    )))
}

// PATCH /admin/matches/{id} - Update match details or result, `tournament_id: null` detaches it
#[tracing::instrument(name = "Admin update match", skip(pool, body))]
pub async fn update_match(
    pool: web::Data<PgPool>,
    match_id: web::Path<Uuid>,
    body: web::Json<UpdateMatchRequest>,
) -> Result<HttpResponse, LeagueError> {
    let match_id = match_id.into_inner();
    let request = body.into_inner();
    let existing = require_found(get_match(pool.get_ref(), match_id).await?, "Match", match_id)?;

    let tournament_id = match request.tournament_id {
        Some(tournament_id) => {
            require_tournament(pool.get_ref(), tournament_id).await?;
            tournament_id
        }
        None => existing.tournament_id,
    };

    let mut game = NewMatch {
        home_club_id: existing.home_club_id,
        away_club_id: existing.away_club_id,
        tournament_id,
        town: request.town.unwrap_or_else(|| existing.town.clone()),
        stadium: request.stadium.unwrap_or_else(|| existing.stadium.clone()),
        kickoff_at: request.kickoff_at.unwrap_or(existing.kickoff_at),
        status: request.status.unwrap_or(existing.status),
        stats: request.stats.unwrap_or_else(|| MatchStats::from(&existing)),
    };
    let validator = LeagueValidator::new();
    sanitize_venue(&validator, &mut game);
    validator.validate_new_match(&game)?;

    let updated = require_found(update_match_row(pool.get_ref(), match_id, &game).await?, "Match", match_id)?;

    // Both the old and the new tournament may need a recompute
    let affected = AffectedEntities::from_matches([&existing, &updated]);
    let applied = LeagueService::new(pool.get_ref().clone())
        .apply_match_changes(&affected)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Match updated",
        MatchChangeResponse { game: updated, applied },
    )))
}

// DELETE /admin/matches/{id} - Delete a match
#[tracing::instrument(name = "Admin delete match", skip(pool))]
pub async fn delete_match(
    pool: web::Data<PgPool>,
    match_id: web::Path<Uuid>,
) -> Result<HttpResponse, LeagueError> {
    let match_id = match_id.into_inner();
    let deleted = require_found(delete_match_row(pool.get_ref(), match_id).await?, "Match", match_id)?;
    tracing::info!("Deleted match {}", match_id);

    let applied = LeagueService::new(pool.get_ref().clone())
        .apply_match_changes(&AffectedEntities::from_matches([&deleted]))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Match deleted",
        MatchChangeResponse { game: deleted, applied },
    )))
}

// POST /admin/matches/status - Mark the selected matches finished or scheduled
#[tracing::instrument(name = "Admin bulk match status", skip(pool, body), fields(status = %body.status.as_str()))]
pub async fn set_matches_status(
    pool: web::Data<PgPool>,
    body: web::Json<BulkStatusRequest>,
) -> Result<HttpResponse, LeagueError> {
    if body.match_ids.is_empty() {
        return Err(LeagueError::invariant("No matches selected"));
    }

    // Results are left as entered: a match finished without a score counts as 0-0
    let updated = set_match_status(pool.get_ref(), &body.match_ids, body.status).await?;
    tracing::info!("Set {} matches to {}", updated.len(), body.status.as_str());

    let applied = LeagueService::new(pool.get_ref().clone())
        .apply_match_changes(&AffectedEntities::from_matches(&updated))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("{} matches updated", updated.len()),
        BulkStatusResponse {
            updated: updated.iter().map(|m| m.id).collect(),
            applied,
        },
    )))
}
