//! Store Errors
//!
//! Error types for persistence operations.

/// Errors that can occur in the store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Email already registered (unique constraint)
    #[error("Email already registered")]
    DuplicateEmail,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored row could not be converted
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

