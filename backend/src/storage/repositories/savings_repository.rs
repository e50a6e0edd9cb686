use anyhow::Result;
use sqlx::Row;
use shared::SavingsEntry;
use crate::storage::connection::DbConnection;

/// Repository for the `savings` ledger table
#[derive(Clone)]
pub struct SavingsRepository {
    db: DbConnection,
}

impl SavingsRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Append an entry and return its auto-assigned id
    pub async fn insert_entry(&self, amount: i64) -> Result<i64> {
        let result = sqlx::query("INSERT INTO savings (amount) VALUES (?)")
            .bind(amount)
            .execute(self.db.pool())
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Delete a single entry. Returns true if a row was removed.
    pub async fn delete_entry(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM savings WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every entry, returning the number removed
    pub async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM savings")
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }

    /// Sum of all entry amounts, 0 for an empty ledger
    pub async fn total_amount(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COALESCE(SUM(amount), 0) AS total FROM savings")
            .fetch_one(self.db.pool())
            .await?;
        Ok(row.try_get("total")?)
    }

    pub async fn get_entry(&self, id: i64) -> Result<Option<SavingsEntry>> {
        let row = sqlx::query("SELECT id, amount FROM savings WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|r| SavingsEntry {
            id: r.get("id"),
            amount: r.get("amount"),
        }))
    }

    /// All entries, oldest first
    pub async fn list_entries(&self) -> Result<Vec<SavingsEntry>> {
        let rows = sqlx::query("SELECT id, amount FROM savings ORDER BY id ASC")
            .fetch_all(self.db.pool())
            .await?;

        let entries = rows
            .iter()
            .map(|row| SavingsEntry {
                id: row.get("id"),
                amount: row.get("amount"),
            })
            .collect();

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> SavingsRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        SavingsRepository::new(db)
    }

    #[tokio::test]
    async fn test_empty_ledger_totals_zero() {
        let repo = setup_test().await;

        assert_eq!(repo.total_amount().await.expect("Failed to sum"), 0);
        assert!(repo.list_entries().await.expect("Failed to list").is_empty());
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = setup_test().await;

        let first = repo.insert_entry(100).await.expect("Failed to insert");
        let second = repo.insert_entry(-40).await.expect("Failed to insert");
        let third = repo.insert_entry(15).await.expect("Failed to insert");

        assert!(first < second && second < third);
        assert_eq!(repo.total_amount().await.unwrap(), 75);

        let entries = repo.list_entries().await.unwrap();
        assert_eq!(
            entries,
            vec![
                SavingsEntry { id: first, amount: 100 },
                SavingsEntry { id: second, amount: -40 },
                SavingsEntry { id: third, amount: 15 },
            ]
        );
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = setup_test().await;

        let first = repo.insert_entry(10).await.unwrap();
        assert!(repo.delete_entry(first).await.unwrap());

        // AUTOINCREMENT never hands out a deleted id again
        let second = repo.insert_entry(10).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_get_entry() {
        let repo = setup_test().await;
        let id = repo.insert_entry(-25).await.unwrap();

        let entry = repo.get_entry(id).await.expect("Failed to get entry");
        assert_eq!(entry, Some(SavingsEntry { id, amount: -25 }));
        assert_eq!(repo.get_entry(id + 100).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_entry_is_not_an_error() {
        let repo = setup_test().await;
        repo.insert_entry(30).await.unwrap();

        let deleted = repo.delete_entry(9999).await.expect("Delete should not fail");
        assert!(!deleted);
        assert_eq!(repo.total_amount().await.unwrap(), 30);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let repo = setup_test().await;
        for amount in [50, 25, -10] {
            repo.insert_entry(amount).await.unwrap();
        }

        let removed = repo.delete_all().await.expect("Failed to delete all");
        assert_eq!(removed, 3);
        assert_eq!(repo.total_amount().await.unwrap(), 0);

        assert_eq!(repo.delete_all().await.unwrap(), 0);
    }
}
