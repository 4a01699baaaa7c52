use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::config::settings::AdminSettings;
use crate::db::admin_queries::{count_admins, insert_admin};
use crate::utils::password::hash_password;

/// Create the configured admin account when no admin exists yet.
/// Returns whether an account was created.
pub async fn ensure_admin_account(pool: &PgPool, settings: &AdminSettings) -> Result<bool, Box<dyn std::error::Error>> {
    if count_admins(pool).await? > 0 {
        return Ok(false);
    }

    let password_hash = hash_password(settings.password.expose_secret())?;
    let admin_id = insert_admin(pool, &settings.username, &password_hash).await?;

    tracing::info!("Created initial admin account '{}' ({})", settings.username, admin_id);
    Ok(true)
}
