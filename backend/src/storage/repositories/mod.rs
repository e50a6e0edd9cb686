// Repository modules
pub mod savings_repository;
pub mod app_state_repository;

// Re-export repository types
pub use savings_repository::SavingsRepository;
pub use app_state_repository::AppStateRepository;
