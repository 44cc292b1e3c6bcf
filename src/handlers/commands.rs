//! Command definitions
//!
//! Commands carry request input into the handlers, already shaped but not
//! yet validated.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::AmountInput;

// =========================================================================
// Accounts
// =========================================================================

/// Command to register a new user
#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl SignupCommand {
    pub fn new(first_name: String, last_name: String, email: String, password: String) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password,
        }
    }
}

/// Command to exchange credentials for a token
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

/// Result of a successful signup
#[derive(Debug, Clone, Serialize)]
pub struct SignupResult {
    pub user_id: i32,
    pub email: String,
}

// =========================================================================
// Entries
// =========================================================================

/// Command to add an entry, creating its category if needed
#[derive(Debug, Clone)]
pub struct AddEntryCommand {
    pub title: String,
    pub category_name: String,
    pub amount: AmountInput,
    pub date: NaiveDate,
}

impl AddEntryCommand {
    pub fn new(title: String, category_name: String, amount: AmountInput, date: NaiveDate) -> Self {
        Self {
            title,
            category_name,
            amount,
            date,
        }
    }
}

/// Command to replace an entry's fields
#[derive(Debug, Clone)]
pub struct EditEntryCommand {
    pub entry_id: i32,
    pub category_id: i32,
    pub title: String,
    pub amount: AmountInput,
    pub date: NaiveDate,
}

impl EditEntryCommand {
    pub fn new(
        entry_id: i32,
        category_id: i32,
        title: String,
        amount: AmountInput,
        date: NaiveDate,
    ) -> Self {
        Self {
            entry_id,
            category_id,
            title,
            amount,
            date,
        }
    }
}
