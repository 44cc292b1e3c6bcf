//! Finance entries and categories
//!
//! Entries are validated at construction time, so an invalid `NewEntry` or
//! `EntryUpdate` cannot reach the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::credentials::{check_length, MAX_TEXT_LEN};
use super::DomainError;

/// A shared, lazily created category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// A stored entry, owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceEntry {
    pub id: i32,
    pub owner_user_id: i32,
    pub category_id: i32,
    pub title: String,
    /// Positive for income, negative for expenses
    pub amount: i32,
    pub date: NaiveDate,
}

/// Entry as listed to its owner, with the category name joined in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub entry_id: i32,
    pub title: String,
    pub amount: i32,
    pub date: NaiveDate,
    pub category_name: String,
}

/// Ids produced by a successful add
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddedEntry {
    pub entry_id: i32,
    pub category_id: i32,
}

/// Amount as it arrives on the wire: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Read as a whole number. Fractional values are rejected.
    pub fn to_integer(&self) -> Result<i64, DomainError> {
        match self {
            AmountInput::Integer(value) => Ok(*value),
            AmountInput::Number(value) => {
                if value.is_finite()
                    && value.fract() == 0.0
                    && *value >= i64::MIN as f64
                    && *value <= i64::MAX as f64
                {
                    Ok(*value as i64)
                } else {
                    Err(DomainError::AmountNotInteger)
                }
            }
            AmountInput::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| DomainError::AmountNotInteger),
        }
    }

    /// Read as any finite number.
    pub fn to_number(&self) -> Result<f64, DomainError> {
        let value = match self {
            AmountInput::Integer(value) => *value as f64,
            AmountInput::Number(value) => *value,
            AmountInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| DomainError::AmountNotNumeric)?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(DomainError::AmountNotNumeric)
        }
    }
}

/// A validated entry about to be added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub category_name: String,
    pub amount: i32,
    pub date: NaiveDate,
}

impl NewEntry {
    /// Validate a new entry.
    ///
    /// # Errors
    /// - `MissingField` if `title` or `category_name` is empty
    /// - `FieldTooLong` if either exceeds its column width
    /// - `NonPositiveAmount` if `amount <= 0`
    /// - `AmountOutOfRange` if `amount` does not fit the storage column
    pub fn new(
        title: String,
        category_name: String,
        amount: i64,
        date: NaiveDate,
    ) -> Result<Self, DomainError> {
        if title.is_empty() {
            return Err(DomainError::MissingField("title"));
        }
        if category_name.is_empty() {
            return Err(DomainError::MissingField("category_name"));
        }
        check_length("title", &title, MAX_TEXT_LEN)?;
        check_length("category_name", &category_name, MAX_TEXT_LEN)?;
        if amount <= 0 {
            return Err(DomainError::NonPositiveAmount(amount));
        }
        let amount = i32::try_from(amount)
            .map_err(|_| DomainError::AmountOutOfRange(amount.to_string()))?;

        Ok(Self {
            title,
            category_name,
            amount,
            date,
        })
    }
}

/// A validated replacement for an existing entry's fields.
///
/// Unlike `NewEntry` the amount may carry either sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryUpdate {
    pub category_id: i32,
    pub title: String,
    pub amount: i32,
    pub date: NaiveDate,
}

impl EntryUpdate {
    /// Validate an update. `amount` is rounded to the nearest whole number.
    pub fn new(
        category_id: i32,
        title: String,
        amount: f64,
        date: NaiveDate,
    ) -> Result<Self, DomainError> {
        check_length("Title", &title, MAX_TEXT_LEN)?;
        if !amount.is_finite() {
            return Err(DomainError::AmountNotNumeric);
        }
        let rounded = amount.round();
        if rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
            return Err(DomainError::AmountOutOfRange(amount.to_string()));
        }

        Ok(Self {
            category_id,
            title,
            amount: rounded as i32,
            date,
        })
    }
}
