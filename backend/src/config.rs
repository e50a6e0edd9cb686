//! Application configuration, built once at startup.

use std::path::PathBuf;

/// Target total used when nothing else is configured
pub const DEFAULT_SAVINGS_GOAL: i64 = 500;

const APP_DIR_NAME: &str = "bloomgarden";
const DATABASE_FILE_NAME: &str = "bloomgarden.db";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Total at which the plant blooms and deposits are blocked
    pub savings_goal: i64,
    /// Location of the SQLite ledger file
    pub database_path: PathBuf,
    /// Clear the goal-reached flag when the ledger is reset. Off by default, so the
    /// celebration fires only once for the lifetime of the database.
    pub reset_clears_goal_flag: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            savings_goal: DEFAULT_SAVINGS_GOAL,
            database_path: default_database_path(),
            reset_clears_goal_flag: false,
        }
    }
}

impl AppConfig {
    pub fn with_goal(mut self, savings_goal: i64) -> Self {
        self.savings_goal = savings_goal;
        self
    }

    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    pub fn with_reset_clears_goal_flag(mut self, enabled: bool) -> Self {
        self.reset_clears_goal_flag = enabled;
        self
    }
}

/// `<local data dir>/bloomgarden/db/bloomgarden.db`, or `./db/bloomgarden.db` when the
/// platform has no data directory
pub fn default_database_path() -> PathBuf {
    match dirs::data_local_dir() {
        Some(dir) => dir.join(APP_DIR_NAME).join("db").join(DATABASE_FILE_NAME),
        None => PathBuf::from("db").join(DATABASE_FILE_NAME),
    }
}
