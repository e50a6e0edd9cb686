use anyhow::{Context, Result};
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;

/// DbConnection owns the SQLite pool backing the savings ledger.
///
/// The pool is capped at one connection, so every statement is serialized
/// through the same handle.
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database file at `path`
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        info!("Opening savings database at {}", path.display());
        Self::connect(options).await
    }

    /// Initialize a private in-memory database for tests
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        use std::str::FromStr;

        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        Self::connect(options).await
    }

    async fn connect(options: SqliteConnectOptions) -> Result<Self> {
        // A single long-lived connection; for in-memory databases it is the database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to connect to savings database")?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool, flushing the database file
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Ledger of signed deposits and withdrawals
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS savings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount INTEGER NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Key/value flags such as goal_reached
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS app_state (
                key TEXT PRIMARY KEY,
                value TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn test_schema_is_created() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .expect("Failed to list tables");
        let tables: Vec<String> = rows.iter().map(|row| row.get("name")).collect();

        assert!(tables.contains(&"savings".to_string()));
        assert!(tables.contains(&"app_state".to_string()));
    }

    #[tokio::test]
    async fn test_open_creates_missing_directories() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("db").join("bloomgarden.db");

        let db = DbConnection::open(&path).await.expect("Failed to open database");
        db.close().await;

        assert!(path.exists(), "database file should have been created");
    }

    #[tokio::test]
    async fn test_reopening_existing_database_keeps_schema() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("bloomgarden.db");

        let first = DbConnection::open(&path).await.expect("first open");
        first.close().await;

        // CREATE TABLE IF NOT EXISTS must be a no-op the second time
        let second = DbConnection::open(&path).await.expect("second open");
        second.close().await;
    }
}
