//! MySQL persistence for coachhub.
//!
//! Models live in [`models`], one zero-sized repository per table in
//! [`repositories`]. Repository functions that take part in multi-statement
//! workflows accept `&mut MySqlConnection` so callers can pass `&mut *tx`.

use sqlx::mysql::MySqlPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::MySqlPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
