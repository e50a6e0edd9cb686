//! # Storage Traits
//!
//! The ledger abstraction the savings service is written against, so the
//! domain layer never touches SQL directly.

use anyhow::Result;
use async_trait::async_trait;
use shared::SavingsEntry;

/// Persistence for the savings ledger and the goal-reached flag.
///
/// All operations are read-your-writes: a completed write is visible to the
/// next read.
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    /// Append an entry and return its id
    async fn add_entry(&self, amount: i64) -> Result<i64>;

    /// Remove the entry with this id.
    /// Returns false if it did not exist, which is not an error.
    async fn delete_entry(&self, id: i64) -> Result<bool>;

    /// Remove every entry, returning how many were removed
    async fn delete_all(&self) -> Result<u64>;

    /// Remove every entry and, if `clear_goal_flag` is set, the goal-reached
    /// flag, as one atomic write. Returns how many entries were removed.
    async fn reset_ledger(&self, clear_goal_flag: bool) -> Result<u64>;

    /// Sum of all current entry amounts, 0 when empty
    async fn total_amount(&self) -> Result<i64>;

    async fn get_entry(&self, id: i64) -> Result<Option<SavingsEntry>>;

    /// All entries in insertion order
    async fn list_entries(&self) -> Result<Vec<SavingsEntry>>;

    async fn is_goal_reached(&self) -> Result<bool>;

    /// Set the goal-reached flag. Idempotent.
    async fn mark_goal_reached(&self) -> Result<()>;

    /// Remove the goal-reached flag
    async fn clear_goal_reached(&self) -> Result<()>;
}
