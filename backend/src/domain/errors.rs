use thiserror::Error;

/// Reasons a savings amount is rejected before it reaches the ledger
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter an amount first")]
    EmptyAmount,
    #[error("Please enter a whole number like 50 or 200 (got '{0}')")]
    InvalidFormat(String),
    #[error("Amount must be greater than 0")]
    NotPositive,
    #[error("Amount is too large. Maximum is {0}")]
    TooLarge(i64),
}

/// Failures of savings operations. Every variant leaves the ledger unchanged.
#[derive(Debug, Error)]
pub enum SavingsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("You've already reached your savings goal! ({total} / {goal})")]
    GoalAlreadyReached { total: i64, goal: i64 },
    #[error("Not enough savings: you have {available} saved, try a smaller amount than {requested}")]
    InsufficientFunds { requested: i64, available: i64 },
    #[error("Nothing to undo: no recent action")]
    NothingToUndo,
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl SavingsError {
    /// True for failures caused by the request rather than by the store
    pub fn is_user_error(&self) -> bool {
        !matches!(self, SavingsError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        let err = SavingsError::InsufficientFunds { requested: 80, available: 30 };
        assert!(err.to_string().contains("you have 30 saved"));

        let err = SavingsError::from(ValidationError::NotPositive);
        assert_eq!(err.to_string(), "Amount must be greater than 0");
    }

    #[test]
    fn test_storage_errors_are_not_user_errors() {
        assert!(SavingsError::NothingToUndo.is_user_error());
        assert!(!SavingsError::Storage(anyhow::anyhow!("disk full")).is_user_error());
    }
}
