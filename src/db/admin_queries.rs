use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::auth::AdminUser;

pub async fn find_admin_by_username<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
) -> Result<Option<AdminUser>, sqlx::Error> {
    sqlx::query_as::<_, AdminUser>(
        "SELECT id, username, password_hash, created_at FROM admin_users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(executor)
    .await
}

pub async fn count_admins<'e>(executor: impl PgExecutor<'e>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
        .fetch_one(executor)
        .await
}

pub async fn insert_admin<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
    password_hash: &str,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO admin_users (id, username, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(password_hash)
    .fetch_one(executor)
    .await
}
