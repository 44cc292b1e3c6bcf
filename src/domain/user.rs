//! User records

/// A registered account. Immutable after signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Always stored lowercased and trimmed
    pub email: String,
    pub password_hash: String,
}

/// A user about to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}
