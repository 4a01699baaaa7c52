use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::league::error::LeagueError;
use crate::league::seed::seed_database;
use crate::models::common::ApiResponse;

#[derive(Debug, Default, Deserialize)]
pub struct SeedRequest {
    /// Random when omitted; the summary reports the seed used
    pub seed: Option<u64>,
}

// POST /admin/seed - Replace all league data with generated data
#[tracing::instrument(name = "Admin seed database", skip(pool))]
pub async fn seed_league_data(
    pool: web::Data<PgPool>,
    body: Option<web::Json<SeedRequest>>,
) -> Result<HttpResponse, LeagueError> {
    let seed = body
        .and_then(|b| b.into_inner().seed)
        .unwrap_or_else(rand::random);

    let summary = seed_database(pool.get_ref(), seed).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Database seeded", summary)))
}
