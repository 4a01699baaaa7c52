use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::club_queries::{count_club_matches, delete_club, insert_club, list_club_summaries, update_club};
use crate::db::helpers::{is_foreign_key_violation, require_found, search_term};
use crate::league::error::LeagueError;
use crate::league::form::FormService;
use crate::league::validation::LeagueValidator;
use crate::models::club::{ClubSearchQuery, CreateClubRequest, UpdateClubRequest};
use crate::models::common::{ApiResponse, PaginationQuery};

// GET /admin/clubs - List clubs with search and pagination
pub async fn get_clubs(
    pool: web::Data<PgPool>,
    query: web::Query<ClubSearchQuery>,
) -> Result<HttpResponse, LeagueError> {
    let (limit, offset) = PaginationQuery { page: query.page, limit: query.limit }.limit_offset();
    let pattern = search_term(query.q.as_deref());

    let clubs = list_club_summaries(pool.get_ref(), pattern.as_deref(), limit, offset).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Clubs retrieved", clubs)))
}

// POST /admin/clubs - Create a club
#[tracing::instrument(name = "Admin create club", skip(pool, body), fields(name = %body.name))]
pub async fn create_club(
    pool: web::Data<PgPool>,
    body: web::Json<CreateClubRequest>,
) -> Result<HttpResponse, LeagueError> {
    let validator = LeagueValidator::new();
    validator.validate_create_club_request(&body)?;

    let mut request = body.into_inner();
    request.name = validator.sanitize_string_input(&request.name);
    request.country = validator.sanitize_string_input(&request.country);
    request.town = validator.sanitize_string_input(&request.town);
    request.stadium = validator.sanitize_string_input(&request.stadium);

    let club = insert_club(pool.get_ref(), &request).await?;
    tracing::info!("Created club {} ({})", club.name, club.id);
    Ok(HttpResponse::Created().json(ApiResponse::success("Club created", club)))
}

// PATCH /admin/clubs/{id} - Update a club
#[tracing::instrument(name = "Admin update club", skip(pool, body))]
pub async fn update_club_details(
    pool: web::Data<PgPool>,
    club_id: web::Path<Uuid>,
    body: web::Json<UpdateClubRequest>,
) -> Result<HttpResponse, LeagueError> {
    let club_id = club_id.into_inner();
    let validator = LeagueValidator::new();
    validator.validate_update_club_request(&body)?;

    let mut request = body.into_inner();
    for field in [&mut request.name, &mut request.country, &mut request.town, &mut request.stadium] {
        if let Some(value) = field.as_mut() {
            *value = validator.sanitize_string_input(value);
        }
    }

    let club = require_found(update_club(pool.get_ref(), club_id, &request).await?, "Club", club_id)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Club updated", club)))
}

// DELETE /admin/clubs/{id} - Delete a club that no match references
#[tracing::instrument(name = "Admin delete club", skip(pool))]
pub async fn delete_club_by_id(
    pool: web::Data<PgPool>,
    club_id: web::Path<Uuid>,
) -> Result<HttpResponse, LeagueError> {
    let club_id = club_id.into_inner();

    let match_count = count_club_matches(pool.get_ref(), club_id).await?;
    if match_count > 0 {
        return Err(LeagueError::Conflict(format!(
            "Club {} is referenced by {} matches",
            club_id, match_count
        )));
    }

    // A match may have been added since the count
    let deleted = match delete_club(pool.get_ref(), club_id).await {
        Ok(deleted) => deleted,
        Err(e) if is_foreign_key_violation(&e) => {
            return Err(LeagueError::Conflict(format!("Club {} is referenced by matches", club_id)));
        }
        Err(e) => return Err(e.into()),
    };

    if !deleted {
        return Err(LeagueError::not_found("Club", club_id));
    }

    tracing::info!("Deleted club {}", club_id);
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Club deleted")))
}

// POST /admin/clubs/{id}/refresh-form - Rebuild form slots and the upcoming fixture flag
pub async fn refresh_club_form(
    pool: web::Data<PgPool>,
    club_id: web::Path<Uuid>,
) -> Result<HttpResponse, LeagueError> {
    let form = FormService::new(pool.get_ref().clone())
        .refresh_club(club_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Club form refreshed", form)))
}
