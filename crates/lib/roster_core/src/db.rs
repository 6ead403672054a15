//! SQLite connection pool management.
//!
//! Provides `connect` for on-disk databases (created on first use) and
//! `connect_in_memory` for ephemeral stores used by tests and demos.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;
use tracing::info;

/// Maximum time to wait for a pooled connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while opening the store.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DbError>;

/// Open a pool against `url` (e.g. `sqlite://roster.db`), creating the file if missing.
///
/// Foreign keys are enforced on every connection.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;

    info!(url, max_connections, "database pool ready");
    Ok(pool)
}

/// Open a single-connection in-memory pool.
///
/// The connection is never recycled, otherwise the database would vanish with it.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Connect to `url` and bring the schema up to date.
pub async fn open(url: &str, max_connections: u32) -> Result<SqlitePool> {
    let pool = connect(url, max_connections).await?;
    crate::migrate::migrate(&pool).await?;
    Ok(pool)
}

/// In-memory pool with the schema applied and roles seeded.
pub async fn open_in_memory() -> Result<SqlitePool> {
    let pool = connect_in_memory().await?;
    crate::migrate::migrate(&pool).await?;
    Ok(pool)
}

/// Returns whether the store answers a trivial query.
pub async fn ping(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_store_is_seeded() -> Result<()> {
        let pool = open_in_memory().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles")
            .fetch_one(&pool)
            .await?;
        assert_eq!(3, count);
        assert!(ping(&pool).await);

        Ok(())
    }

    #[tokio::test]
    async fn file_store_is_created_and_persists() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let url = format!("sqlite://{}", dir.path().join("roster.db").display());

        let pool = open(&url, 2).await?;
        sqlx::query("INSERT INTO roles (name) VALUES ('Contractor')")
            .execute(&pool)
            .await?;
        pool.close().await;

        // Reopening runs migrations again, which must be a no-op.
        let pool = open(&url, 2).await?;
        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM roles ORDER BY id")
            .fetch_all(&pool)
            .await?;
        assert_eq!(vec!["Admin", "Manager", "Staff", "Contractor"], names);
        pool.close().await;

        Ok(())
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() -> Result<()> {
        let pool = open_in_memory().await?;

        let result = sqlx::query(
            "INSERT INTO employees (name, email, role_id) VALUES ('Ghost', 'ghost@example.com', 99)",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err());

        Ok(())
    }
}
