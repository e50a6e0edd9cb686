//! # Storage Module
//!
//! Persistence for the savings ledger. Everything lives in one SQLite file:
//!
//! - `savings`: append/delete log of signed amounts
//! - `app_state`: key/value flags, currently only `goal_reached`
//!
//! The domain layer depends on [`LedgerStorage`]; [`LedgerStore`] is the
//! SQLite implementation built from the per-table repositories.

pub mod connection;
pub mod ledger;
pub mod repositories;
pub mod traits;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use ledger::LedgerStore;
pub use repositories::{AppStateRepository, SavingsRepository};
pub use traits::LedgerStorage;
