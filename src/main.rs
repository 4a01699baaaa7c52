use std::net::TcpListener;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use football_league_backend::run;
use football_league_backend::config::settings::{get_config, get_jwt_settings};
use football_league_backend::telemetry::{get_subscriber, init_subscriber};
use football_league_backend::services::{ensure_admin_account, SchedulerService};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "football-league-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    // JWT
    let jwt_settings = get_jwt_settings(&config);
    // Only try to establish connection when actually used
    let connection_pool = PgPoolOptions::new()
        .max_connections(32)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(
            config.database.connection_string().expose_secret()
        )
        .expect("Failed to create Postgres connection pool");

    if let Err(e) = sqlx::migrate!("./migrations").run(&connection_pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        std::process::exit(1);
    }

    match ensure_admin_account(&connection_pool, &config.admin).await {
        Ok(true) => tracing::info!("Admin account bootstrapped"),
        Ok(false) => {}
        Err(e) => tracing::error!("Failed to bootstrap admin account: {}", e),
    }

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;

    // Initialize the scheduler service
    let scheduler_service = match SchedulerService::new(connection_pool.clone(), config.scheduler.clone()).await {
        Ok(scheduler) => scheduler,
        Err(e) => {
            tracing::error!("Failed to create scheduler service: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = scheduler_service.start().await {
        tracing::error!("Failed to start scheduler: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Listening on {}", address);
    let result = run(listener, connection_pool, jwt_settings)?.await;

    if let Err(e) = scheduler_service.stop().await {
        tracing::warn!("Failed to stop scheduler: {}", e);
    }
    result
}
