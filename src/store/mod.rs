//! Store module
//!
//! Persistence seams for users, categories and finance entries. Every entry
//! operation is scoped to an owning user id.

mod error;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{AddedEntry, EntryUpdate, EntryView, NewEntry, NewUser, User};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Creates and finds user accounts
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Insert a user. Fails with `DuplicateEmail` when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<i32, StoreError>;

    /// Look up a user by normalized email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Lookup-or-create for shared categories
#[async_trait]
pub trait CategoryRegistry: Send + Sync {
    /// Return the id of the category named exactly `name`, creating it if needed
    async fn resolve_category(&self, name: &str) -> Result<i32, StoreError>;

    async fn category_exists(&self, category_id: i32) -> Result<bool, StoreError>;

    /// All category names, oldest first
    async fn list_category_names(&self) -> Result<Vec<String>, StoreError>;
}

/// Owner-scoped entry persistence
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Resolve the category and insert the entry as one unit
    async fn add_entry(&self, owner_id: i32, entry: NewEntry) -> Result<AddedEntry, StoreError>;

    /// Entries owned by `owner_id`, ascending by entry id
    async fn list_entries(&self, owner_id: i32) -> Result<Vec<EntryView>, StoreError>;

    /// Returns `false` when no entry `entry_id` is owned by `owner_id`
    async fn update_entry(
        &self,
        owner_id: i32,
        entry_id: i32,
        update: EntryUpdate,
    ) -> Result<bool, StoreError>;

    /// Returns `false` when no entry `entry_id` is owned by `owner_id`
    async fn delete_entry(&self, owner_id: i32, entry_id: i32) -> Result<bool, StoreError>;
}

/// Everything the request handlers need from persistence
pub trait FinanceStore: UserDirectory + CategoryRegistry + EntryStore {}

impl<T> FinanceStore for T where T: UserDirectory + CategoryRegistry + EntryStore {}

/// Shared handle used by the application state
pub type SharedStore = Arc<dyn FinanceStore>;
