//! Authentication module
//!
//! Argon2 password hashing and bearer token issue/verification.

pub mod password;
pub mod token;

pub use password::{PasswordHashingParams, PasswordService};
pub use token::{Claims, Identity, TokenService, TOKEN_TTL_MINUTES};

/// Authentication errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Signature mismatch or malformed token
    #[error("Invalid token")]
    InvalidToken,

    /// Token is at or past its expiry
    #[error("Token has expired")]
    TokenExpired,

    #[error("Token creation failed: {0}")]
    TokenCreation(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Invalid password hashing parameters: {0}")]
    InvalidParams(String),
}
