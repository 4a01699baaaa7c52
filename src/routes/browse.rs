use actix_web::{get, web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::browse_handler::{self, SearchQuery};
use crate::league::error::LeagueError;

#[get("/search")]
async fn search(
    query: web::Query<SearchQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, LeagueError> {
    browse_handler::search(query, pool).await
}

#[get("/clubs/{id}")]
async fn club_detail(
    club_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, LeagueError> {
    browse_handler::club_detail(club_id, pool).await
}

#[get("/tournaments/{id}")]
async fn tournament_detail(
    tournament_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, LeagueError> {
    browse_handler::tournament_detail(tournament_id, pool).await
}

#[get("/matches/{id}")]
async fn match_detail(
    match_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, LeagueError> {
    browse_handler::match_detail(match_id, pool).await
}
