use std::collections::BTreeSet;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::club_queries::{existing_club_ids, get_club};
use crate::db::helpers::{require_found, search_term};
use crate::db::tournament_queries::{
    delete_tournament, get_tournament, insert_tournament, list_tournament_summaries,
    remove_participant as delete_participation, update_tournament,
};
use crate::league::error::LeagueError;
use crate::league::fixtures::FixtureService;
use crate::league::league::{AffectedEntities, LeagueService, MatchChangeSummary};
use crate::league::standings::{ResetScope, StandingsService};
use crate::league::validation::LeagueValidator;
use crate::models::common::{ApiResponse, PaginationQuery};
use crate::models::matches::{GenerateFixturesRequest, Match};
use crate::models::tournament::{
    AddParticipantRequest, CreateTournamentRequest, Tournament, UpdateTournamentRequest,
};

#[derive(Debug, Deserialize)]
pub struct TournamentQueryParams {
    pub q: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreatedTournamentResponse {
    pub tournament: Tournament,
    pub participants_added: u64,
}

#[derive(Debug, Serialize)]
pub struct GeneratedFixturesResponse {
    pub matches: Vec<Match>,
    pub applied: MatchChangeSummary,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub participations_reset: u64,
}

// GET /admin/tournaments - List tournaments with participant and match counts
pub async fn get_tournaments(
    pool: web::Data<PgPool>,
    query: web::Query<TournamentQueryParams>,
) -> Result<HttpResponse, LeagueError> {
    let (limit, offset) = PaginationQuery { page: query.page, limit: query.limit }.limit_offset();
    let pattern = search_term(query.q.as_deref());

    let tournaments = list_tournament_summaries(pool.get_ref(), pattern.as_deref(), limit, offset).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Tournaments retrieved", tournaments)))
}

// POST /admin/tournaments - Create a tournament, optionally with its participants
#[tracing::instrument(name = "Admin create tournament", skip(pool, body), fields(name = %body.name))]
pub async fn create_tournament(
    pool: web::Data<PgPool>,
    body: web::Json<CreateTournamentRequest>,
) -> Result<HttpResponse, LeagueError> {
    let validator = LeagueValidator::new();
    validator.validate_create_tournament_request(&body)?;
    let name = validator.validate_and_sanitize_name("Tournament name", &body.name, 255)?;
    let country = validator.sanitize_string_input(&body.country);

    let club_ids: Vec<Uuid> = body.club_ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
    let existing = existing_club_ids(pool.get_ref(), &club_ids).await?;
    if let Some(missing) = club_ids.iter().find(|id| !existing.contains(id)) {
        return Err(LeagueError::not_found("Club", *missing));
    }

    let tournament = insert_tournament(pool.get_ref(), &name, &country, body.logo.as_deref())
        .await
        .map_err(|e| LeagueError::from_unique_violation(e, format!("Tournament '{}' already exists", name)))?;

    let participants_added = StandingsService::new(pool.get_ref().clone())
        .initialize_for_tournament(tournament.id, &club_ids)
        .await?;

    tracing::info!("Created tournament {} ({})", tournament.name, tournament.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Tournament created",
        CreatedTournamentResponse { tournament, participants_added },
    )))
}

// PATCH /admin/tournaments/{id} - Update tournament details
pub async fn update_tournament_details(
    pool: web::Data<PgPool>,
    tournament_id: web::Path<Uuid>,
    body: web::Json<UpdateTournamentRequest>,
) -> Result<HttpResponse, LeagueError> {
    let tournament_id = tournament_id.into_inner();
    let validator = LeagueValidator::new();

    let mut request = body.into_inner();
    if let Some(name) = request.name.as_deref() {
        request.name = Some(validator.validate_and_sanitize_name("Tournament name", name, 255)?);
    }
    if let Some(country) = request.country.as_deref() {
        request.country = Some(validator.sanitize_string_input(country));
    }

    let tournament = update_tournament(pool.get_ref(), tournament_id, &request)
        .await
        .map_err(|e| LeagueError::from_unique_violation(e, "Tournament name already in use"))?;
    let tournament = require_found(tournament, "Tournament", tournament_id)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Tournament updated", tournament)))
}

// DELETE /admin/tournaments/{id} - Delete a tournament, its matches are kept detached
#[tracing::instrument(name = "Admin delete tournament", skip(pool))]
pub async fn delete_tournament_by_id(
    pool: web::Data<PgPool>,
    tournament_id: web::Path<Uuid>,
) -> Result<HttpResponse, LeagueError> {
    let tournament_id = tournament_id.into_inner();
    if !delete_tournament(pool.get_ref(), tournament_id).await? {
        return Err(LeagueError::not_found("Tournament", tournament_id));
    }

    tracing::info!("Deleted tournament {}", tournament_id);
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Tournament deleted")))
}

// POST /admin/tournaments/{id}/participants - Add a club to a tournament
#[tracing::instrument(name = "Admin add participant", skip(pool, body), fields(club_id = %body.club_id))]
pub async fn add_participant(
    pool: web::Data<PgPool>,
    tournament_id: web::Path<Uuid>,
    body: web::Json<AddParticipantRequest>,
) -> Result<HttpResponse, LeagueError> {
    let tournament_id = tournament_id.into_inner();
    require_found(get_tournament(pool.get_ref(), tournament_id).await?, "Tournament", tournament_id)?;
    require_found(get_club(pool.get_ref(), body.club_id).await?, "Club", body.club_id)?;

    let created = StandingsService::new(pool.get_ref().clone())
        .initialize_for_tournament(tournament_id, &[body.club_id])
        .await?;
    if created == 0 {
        return Err(LeagueError::Conflict(format!(
            "Club {} already participates in tournament {}",
            body.club_id, tournament_id
        )));
    }

    // The club may already have matches in this tournament
    let summary = LeagueService::new(pool.get_ref().clone())
        .recompute_tournaments([tournament_id])
        .await;
    Ok(HttpResponse::Created().json(ApiResponse::success("Participant added", summary)))
}

// DELETE /admin/tournaments/{id}/participants/{club_id} - Remove a club from a tournament
#[tracing::instrument(name = "Admin remove participant", skip(pool))]
pub async fn remove_participant(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, LeagueError> {
    let (tournament_id, club_id) = path.into_inner();
    if !delete_participation(pool.get_ref(), tournament_id, club_id).await? {
        return Err(LeagueError::not_found("Participation", club_id));
    }

    // Matches against the removed club no longer count for anyone
    let summary = LeagueService::new(pool.get_ref().clone())
        .recompute_tournaments([tournament_id])
        .await;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Participant removed", summary)))
}

// POST /admin/tournaments/{id}/fixtures - Generate a round robin of scheduled matches
#[tracing::instrument(name = "Admin generate fixtures", skip(pool, body))]
pub async fn generate_fixtures(
    pool: web::Data<PgPool>,
    tournament_id: web::Path<Uuid>,
    body: web::Json<GenerateFixturesRequest>,
) -> Result<HttpResponse, LeagueError> {
    let tournament_id = tournament_id.into_inner();
    let matches = FixtureService::new(pool.get_ref().clone())
        .generate(tournament_id, &body)
        .await?;

    let affected = AffectedEntities::from_matches(&matches);
    let applied = LeagueService::new(pool.get_ref().clone())
        .apply_match_changes(&affected)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        format!("{} fixtures generated", matches.len()),
        GeneratedFixturesResponse { matches, applied },
    )))
}

// POST /admin/tournaments/{id}/recalculate - Recompute standings from the match log
#[tracing::instrument(name = "Admin recalculate standings", skip(pool))]
pub async fn recalculate_standings(
    pool: web::Data<PgPool>,
    tournament_id: web::Path<Uuid>,
) -> Result<HttpResponse, LeagueError> {
    let report = StandingsService::new(pool.get_ref().clone())
        .recompute(tournament_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Standings recalculated", report)))
}

// POST /admin/tournaments/{id}/reset - Zero every participant's counters
#[tracing::instrument(name = "Admin reset standings", skip(pool))]
pub async fn reset_standings(
    pool: web::Data<PgPool>,
    tournament_id: web::Path<Uuid>,
) -> Result<HttpResponse, LeagueError> {
    let tournament_id = tournament_id.into_inner();
    require_found(get_tournament(pool.get_ref(), tournament_id).await?, "Tournament", tournament_id)?;

    let participations_reset = StandingsService::new(pool.get_ref().clone())
        .reset(ResetScope::Tournament(tournament_id))
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Standings reset",
        ResetResponse { participations_reset },
    )))
}

// GET /admin/tournaments/{id}/stats - Counter totals across participants
pub async fn get_tournament_totals(
    pool: web::Data<PgPool>,
    tournament_id: web::Path<Uuid>,
) -> Result<HttpResponse, LeagueError> {
    let totals = StandingsService::new(pool.get_ref().clone())
        .tournament_totals(tournament_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Tournament totals retrieved", totals)))
}
