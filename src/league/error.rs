use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use uuid::Uuid;

use crate::models::common::ApiResponse;

#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Standings recompute for tournament {tournament_id} did not complete")]
    TransactionFailure {
        tournament_id: Uuid,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl LeagueError {
    pub fn invariant(message: impl Into<String>) -> Self {
        LeagueError::InvariantViolation(message.into())
    }

    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        LeagueError::NotFound { entity, id }
    }

    /// Translate a unique-constraint violation into `Conflict`, leave other errors as they are
    pub fn from_unique_violation(err: sqlx::Error, message: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                LeagueError::Conflict(message.into())
            }
            _ => LeagueError::Database(err),
        }
    }
}

impl ResponseError for LeagueError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeagueError::InvariantViolation(_) => StatusCode::BAD_REQUEST,
            LeagueError::NotFound { .. } => StatusCode::NOT_FOUND,
            LeagueError::Conflict(_) => StatusCode::CONFLICT,
            LeagueError::TransactionFailure { .. } | LeagueError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            LeagueError::Database(e) => {
                tracing::error!("Database error: {}", e);
                ApiResponse::<()>::error("Database error")
            }
            LeagueError::TransactionFailure { source, .. } => {
                tracing::error!("{}: {}", self, source);
                ApiResponse::<()>::error(self.to_string())
            }
            _ => ApiResponse::<()>::error(self.to_string()),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
