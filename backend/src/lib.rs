//! # BloomGarden backend
//!
//! Non-UI logic for the BloomGarden savings tracker: an SQLite ledger of
//! deposits and withdrawals, a progress calculator that turns the total into
//! a plant stage, and the service that ties them together.
//!
//! ```text
//! Presentation (any UI, or the bundled terminal driver)
//!     ↓
//! Domain (SavingsService, progress, validation)
//!     ↓
//! Storage (LedgerStore over SQLite)
//! ```

pub mod config;
pub mod domain;
pub mod storage;

use anyhow::Result;
use log::info;

pub use config::*;
pub use domain::*;
pub use storage::*;

/// The wired-up backend a presentation layer drives
pub struct Backend {
    pub config: AppConfig,
    pub db: DbConnection,
    pub savings_service: SavingsService<LedgerStore>,
}

/// Open the ledger named by `config` and build the savings service over it
pub async fn initialize_backend(config: AppConfig) -> Result<Backend> {
    info!("Setting up database");
    let db = DbConnection::open(&config.database_path).await?;

    info!("Setting up savings service (goal {})", config.savings_goal);
    let savings_service = SavingsService::from_config(LedgerStore::new(db.clone()), &config);

    Ok(Backend { config, db, savings_service })
}
