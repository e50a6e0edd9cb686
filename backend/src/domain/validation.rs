//! Amount parsing and range checks shared by every entry point.
//!
//! Presentation layers call [`parse_amount`] on raw text; the savings service
//! re-checks numeric input with [`validate_amount`] before touching the ledger.

use crate::domain::errors::ValidationError;

/// Largest single deposit or withdrawal accepted
pub const MAX_ENTRY_AMOUNT: i64 = 1_000_000_000;

/// Parse user input as a whole, positive amount
pub fn parse_amount(input: &str) -> Result<i64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyAmount);
    }

    let amount: i64 = match trimmed.parse() {
        Ok(amount) => amount,
        // All-digit input that overflows i64 is still just "too large"
        Err(_) if is_unsigned_digits(trimmed) => {
            return Err(ValidationError::TooLarge(MAX_ENTRY_AMOUNT))
        }
        Err(_) => return Err(ValidationError::InvalidFormat(trimmed.to_string())),
    };

    validate_amount(amount)?;
    Ok(amount)
}

/// Check an amount lies in `1..=MAX_ENTRY_AMOUNT`
pub fn validate_amount(amount: i64) -> Result<(), ValidationError> {
    if amount <= 0 {
        Err(ValidationError::NotPositive)
    } else if amount > MAX_ENTRY_AMOUNT {
        Err(ValidationError::TooLarge(MAX_ENTRY_AMOUNT))
    } else {
        Ok(())
    }
}

fn is_unsigned_digits(s: &str) -> bool {
    let digits = s.strip_prefix('+').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
