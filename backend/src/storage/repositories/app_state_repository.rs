use anyhow::Result;
use sqlx::Row;
use crate::storage::connection::DbConnection;

pub const GOAL_REACHED_KEY: &str = "goal_reached";

/// Repository for the `app_state` key/value table
#[derive(Clone)]
pub struct AppStateRepository {
    db: DbConnection,
}

impl AppStateRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a value, overwriting any existing value for the key
    pub async fn put_value(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO app_state (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    pub async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM app_state WHERE key = ?")
            .bind(key)
            .fetch_optional(self.db.pool())
            .await?;

        // The value column is nullable
        Ok(row.and_then(|r| r.get::<Option<String>, _>("value")))
    }

    /// Delete a value by its key. Returns true if it existed.
    pub async fn delete_value(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM app_state WHERE key = ?")
            .bind(key)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_goal_reached(&self) -> Result<bool> {
        Ok(self.get_value(GOAL_REACHED_KEY).await?.as_deref() == Some("true"))
    }

    pub async fn mark_goal_reached(&self) -> Result<()> {
        self.put_value(GOAL_REACHED_KEY, "true").await
    }

    pub async fn clear_goal_reached(&self) -> Result<bool> {
        self.delete_value(GOAL_REACHED_KEY).await
    }
}
