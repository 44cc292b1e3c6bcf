//! Domain module
//!
//! Core domain types and validation rules.

pub mod context;
pub mod credentials;
pub mod entry;
pub mod error;
pub mod user;

pub use context::OperationContext;
pub use credentials::{
    check_length, normalize_email, validate_email, validate_password, MAX_NAME_LEN, MAX_TEXT_LEN,
};
pub use entry::{AddedEntry, AmountInput, Category, EntryUpdate, EntryView, FinanceEntry, NewEntry};
pub use error::DomainError;
pub use user::{NewUser, User};
