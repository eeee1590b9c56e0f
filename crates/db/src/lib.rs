//! Precinct persistence layer.
//!
//! Models are `FromRow` structs mirroring table rows; repositories are
//! zero-sized structs whose async methods take `&PgPool` as the first
//! argument. State transitions are compare-and-swap updates so that two
//! concurrent transitions against the same row resolve to exactly one
//! winner.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    let migrator = sqlx::migrate!("./migrations");
    tracing::debug!(count = migrator.migrations.len(), "Applying migrations");
    migrator.run(pool).await
}
