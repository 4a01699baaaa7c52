use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;

use crate::db::tournament_queries::{list_participations, tournaments_of_participations};
use crate::handlers::admin::tournament_handler::ResetResponse;
use crate::league::error::LeagueError;
use crate::league::league::LeagueService;
use crate::league::standings::{ResetScope, StandingsService};
use crate::models::common::{ApiResponse, PaginationQuery};
use crate::models::tournament::{ParticipationFilter, ParticipationSelection, ParticipationWithNames};

#[derive(Debug, Serialize)]
pub struct AdminParticipationResponse {
    #[serde(flatten)]
    pub participation: ParticipationWithNames,
    pub points: i32,
    pub goal_difference: i32,
    pub win_percentage: f64,
}

impl From<ParticipationWithNames> for AdminParticipationResponse {
    fn from(participation: ParticipationWithNames) -> Self {
        let counters = participation.counters;
        Self {
            participation,
            points: counters.points(),
            goal_difference: counters.goal_difference(),
            win_percentage: counters.win_percentage(),
        }
    }
}

fn require_selection(selection: &ParticipationSelection) -> Result<(), LeagueError> {
    if selection.participation_ids.is_empty() {
        return Err(LeagueError::invariant("No participations selected"));
    }
    Ok(())
}

// GET /admin/participations - List participations, filtered by tournament or club
pub async fn get_participations(
    pool: web::Data<PgPool>,
    query: web::Query<ParticipationFilter>,
) -> Result<HttpResponse, LeagueError> {
    let (limit, offset) = PaginationQuery { page: query.page, limit: query.limit }.limit_offset();

    let participations: Vec<AdminParticipationResponse> =
        list_participations(pool.get_ref(), query.tournament_id, query.club_id, limit, offset)
            .await?
            .into_iter()
            .map(AdminParticipationResponse::from)
            .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success("Participations retrieved", participations)))
}

// POST /admin/participations/recalculate - Recompute the tournaments of the selected rows
#[tracing::instrument(name = "Admin bulk recalculate", skip(pool, body))]
pub async fn recalculate_participations(
    pool: web::Data<PgPool>,
    body: web::Json<ParticipationSelection>,
) -> Result<HttpResponse, LeagueError> {
    require_selection(&body)?;

    let tournament_ids = tournaments_of_participations(pool.get_ref(), &body.participation_ids).await?;
    let summary = LeagueService::new(pool.get_ref().clone())
        .recompute_tournaments(tournament_ids)
        .await;

    tracing::info!(
        "Bulk recalculation: {} tournaments recomputed, {} failed",
        summary.standings.len(),
        summary.failed.len()
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success("Statistics recalculated", summary)))
}

// POST /admin/participations/reset - Zero the counters of the selected rows
#[tracing::instrument(name = "Admin bulk reset", skip(pool, body))]
pub async fn reset_participations(
    pool: web::Data<PgPool>,
    body: web::Json<ParticipationSelection>,
) -> Result<HttpResponse, LeagueError> {
    require_selection(&body)?;

    let participations_reset = StandingsService::new(pool.get_ref().clone())
        .reset(ResetScope::Participations(body.into_inner().participation_ids))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Statistics reset",
        ResetResponse { participations_reset },
    )))
}
