// src/handlers/auth_handler.rs
use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::config::jwt::JwtSettings;
use crate::db::admin_queries::find_admin_by_username;
use crate::middleware::auth::create_admin_token;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::models::common::ApiResponse;
use crate::utils::password::verify_password;

#[tracing::instrument(
    name = "Admin login attempt",
    skip(login_form, pool, jwt_settings),
    fields(
        username = %login_form.username
    )
)]
pub async fn login_admin(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>,
) -> HttpResponse {
    let admin = match find_admin_by_username(pool.get_ref(), &login_form.username).await {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            tracing::info!("Admin not found or invalid credentials");
            return HttpResponse::Unauthorized().json(ApiResponse::<()>::error("Invalid credentials"));
        }
        Err(e) => {
            tracing::error!("Database error occurred: {:?}", e);
            return HttpResponse::InternalServerError().json(ApiResponse::<()>::error("Database error"));
        }
    };

    if !verify_password(login_form.password.expose_secret(), &admin.password_hash) {
        tracing::info!("Invalid password");
        return HttpResponse::Unauthorized().json(ApiResponse::<()>::error("Invalid credentials"));
    }

    match create_admin_token(&jwt_settings, &admin) {
        Ok((token, expires_at)) => HttpResponse::Ok().json(ApiResponse::success(
            "Login successful",
            LoginResponse { token, expires_at },
        )),
        Err(e) => {
            tracing::error!("Error generating JWT token: {:?}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error("Failed to generate token"))
        }
    }
}
