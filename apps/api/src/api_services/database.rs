use hrdesk_application::ObjectStorage;
use hrdesk_core::AppError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, AppError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))
}

/// Provisions tables, seed rules, and the attachment bucket.
pub async fn run_setup(pool: &PgPool, storage: &dyn ObjectStorage) -> Result<(), AppError> {
    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;
    info!("database migrations applied successfully");

    storage.ensure_bucket().await?;
    info!("attachment bucket ready");

    Ok(())
}
