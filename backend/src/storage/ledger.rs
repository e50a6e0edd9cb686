use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use shared::SavingsEntry;

use crate::storage::connection::DbConnection;
use crate::storage::repositories::app_state_repository::GOAL_REACHED_KEY;
use crate::storage::repositories::{AppStateRepository, SavingsRepository};
use crate::storage::traits::LedgerStorage;

/// SQLite-backed ledger: the `savings` table plus the goal flag in `app_state`
#[derive(Clone)]
pub struct LedgerStore {
    db: DbConnection,
    savings_repository: SavingsRepository,
    app_state_repository: AppStateRepository,
}

impl LedgerStore {
    pub fn new(db: DbConnection) -> Self {
        Self {
            savings_repository: SavingsRepository::new(db.clone()),
            app_state_repository: AppStateRepository::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl LedgerStorage for LedgerStore {
    async fn add_entry(&self, amount: i64) -> Result<i64> {
        let id = self.savings_repository.insert_entry(amount).await?;
        debug!("Stored savings entry {} ({:+})", id, amount);
        Ok(id)
    }

    async fn delete_entry(&self, id: i64) -> Result<bool> {
        self.savings_repository.delete_entry(id).await
    }

    async fn delete_all(&self) -> Result<u64> {
        self.savings_repository.delete_all().await
    }

    async fn reset_ledger(&self, clear_goal_flag: bool) -> Result<u64> {
        let mut tx = self.db.pool().begin().await?;

        let removed = sqlx::query("DELETE FROM savings")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if clear_goal_flag {
            sqlx::query("DELETE FROM app_state WHERE key = ?")
                .bind(GOAL_REACHED_KEY)
                .execute(&mut *tx)
                .await?;
        }

        // Dropping the transaction on an early return rolls it back
        tx.commit().await?;
        debug!("Reset ledger: {} entries removed", removed);
        Ok(removed)
    }

    async fn get_entry(&self, id: i64) -> Result<Option<SavingsEntry>> {
        self.savings_repository.get_entry(id).await
    }

    async fn total_amount(&self) -> Result<i64> {
        self.savings_repository.total_amount().await
    }

    async fn list_entries(&self) -> Result<Vec<SavingsEntry>> {
        self.savings_repository.list_entries().await
    }

    async fn is_goal_reached(&self) -> Result<bool> {
        self.app_state_repository.is_goal_reached().await
    }

    async fn mark_goal_reached(&self) -> Result<()> {
        self.app_state_repository.mark_goal_reached().await
    }

    async fn clear_goal_reached(&self) -> Result<()> {
        self.app_state_repository.clear_goal_reached().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> LedgerStore {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        LedgerStore::new(db)
    }

    #[tokio::test]
    async fn test_total_tracks_adds_and_deletes() {
        let store = setup_test().await;

        let deposit = store.add_entry(200).await.unwrap();
        store.add_entry(-50).await.unwrap();
        assert_eq!(store.total_amount().await.unwrap(), 150);

        assert!(store.delete_entry(deposit).await.unwrap());
        assert_eq!(store.total_amount().await.unwrap(), -50);
    }

    #[tokio::test]
    async fn test_goal_flag_is_independent_of_ledger() {
        let store = setup_test().await;
        store.add_entry(500).await.unwrap();
        store.mark_goal_reached().await.unwrap();

        store.delete_all().await.unwrap();

        assert_eq!(store.total_amount().await.unwrap(), 0);
        assert!(store.is_goal_reached().await.unwrap());
    }

    #[tokio::test]
    async fn test_reset_ledger_clears_flag_when_asked() {
        let store = setup_test().await;
        store.add_entry(500).await.unwrap();
        store.mark_goal_reached().await.unwrap();

        assert_eq!(store.reset_ledger(false).await.unwrap(), 1);
        assert!(store.is_goal_reached().await.unwrap());

        store.add_entry(40).await.unwrap();
        assert_eq!(store.reset_ledger(true).await.unwrap(), 1);
        assert_eq!(store.total_amount().await.unwrap(), 0);
        assert!(!store.is_goal_reached().await.unwrap());
    }

    #[tokio::test]
    async fn test_reset_ledger_rolls_back_when_flag_clear_fails() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let store = LedgerStore::new(db.clone());
        store.add_entry(200).await.unwrap();

        // Make the second statement of the reset fail
        sqlx::query("DROP TABLE app_state").execute(db.pool()).await.unwrap();

        assert!(store.reset_ledger(true).await.is_err());
        assert_eq!(store.total_amount().await.unwrap(), 200);
        assert_eq!(store.list_entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("bloomgarden.db");

        {
            let db = DbConnection::open(&path).await.unwrap();
            let store = LedgerStore::new(db.clone());
            store.add_entry(120).await.unwrap();
            store.add_entry(-20).await.unwrap();
            store.mark_goal_reached().await.unwrap();
            db.close().await;
        }

        let db = DbConnection::open(&path).await.unwrap();
        let store = LedgerStore::new(db);
        assert_eq!(store.total_amount().await.unwrap(), 100);
        assert_eq!(store.list_entries().await.unwrap().len(), 2);
        assert!(store.is_goal_reached().await.unwrap());
    }
}
