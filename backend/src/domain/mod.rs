//! # Domain Module
//!
//! Business rules for the savings ledger, independent of any UI or storage
//! backend.
//!
//! - **progress**: total → plant stage, message and progress-bar value
//! - **validation**: parsing and range checks for entered amounts
//! - **savings_service**: deposits, withdrawals, undo, reset and the one-time
//!   goal transition
//! - **errors**: the typed failures surfaced to presentation layers

pub mod errors;
pub mod progress;
pub mod savings_service;
pub mod validation;

pub use errors::*;
pub use progress::*;
pub use savings_service::*;
pub use validation::*;
