//! Domain Error Types
//!
//! Pure validation errors that don't depend on infrastructure.

use thiserror::Error;

/// Domain-specific errors
///
/// These errors represent malformed or out-of-range input. They are detected
/// before anything is written and always map to a client error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Email does not have a `local@domain.tld` shape
    #[error("Invalid email format")]
    InvalidEmail,

    /// Password does not meet the complexity rules
    #[error("Password must contain: 8+ characters, 1 uppercase, 1 lowercase, 1 number, 1 symbol (@$!%*?&)")]
    WeakPassword,

    /// Required field missing or empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Field is longer than its storage column allows
    #[error("Field {0} exceeds {1} characters")]
    FieldTooLong(&'static str, usize),

    /// New entries must carry a strictly positive amount
    #[error("Amount must be greater than 0 (got {0})")]
    NonPositiveAmount(i64),

    /// Amount could not be read as a whole number
    #[error("Amount must be a valid integer")]
    AmountNotInteger,

    /// Amount could not be read as a finite number
    #[error("Amount must be a valid number")]
    AmountNotNumeric,

    /// Amount does not fit the storage column
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),
}
