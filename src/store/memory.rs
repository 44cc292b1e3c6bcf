//! In-memory store
//!
//! Same contract as `PgStore`, held behind one lock. Used by the test suite
//! and for running the API without a database (`DATABASE_URL=memory`).

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    AddedEntry, Category, EntryUpdate, EntryView, FinanceEntry, NewEntry, NewUser, User,
};

use super::{CategoryRegistry, EntryStore, StoreError, UserDirectory};

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    categories: Vec<Category>,
    entries: Vec<FinanceEntry>,
    next_user_id: i32,
    next_category_id: i32,
    next_entry_id: i32,
}

impl MemoryState {
    fn resolve_category(&mut self, name: &str) -> i32 {
        if let Some(category) = self.categories.iter().find(|c| c.name == name) {
            return category.id;
        }
        self.next_category_id += 1;
        let id = self.next_category_id;
        self.categories.push(Category {
            id,
            name: name.to_string(),
        });
        id
    }
}

/// Store kept entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given category names, in order
    pub fn with_categories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = MemoryState::default();
        for name in names {
            state.resolve_category(name.as_ref());
        }
        Self {
            state: RwLock::new(state),
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<i32, StoreError> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        state.next_user_id += 1;
        let id = state.next_user_id;
        state.users.push(User {
            id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
        });
        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl CategoryRegistry for MemoryStore {
    async fn resolve_category(&self, name: &str) -> Result<i32, StoreError> {
        Ok(self.state.write().await.resolve_category(name))
    }

    async fn category_exists(&self, category_id: i32) -> Result<bool, StoreError> {
        let state = self.state.read().await;
        Ok(state.categories.iter().any(|c| c.id == category_id))
    }

    async fn list_category_names(&self) -> Result<Vec<String>, StoreError> {
        let state = self.state.read().await;
        Ok(state.categories.iter().map(|c| c.name.clone()).collect())
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn add_entry(&self, owner_id: i32, entry: NewEntry) -> Result<AddedEntry, StoreError> {
        let mut state = self.state.write().await;
        let category_id = state.resolve_category(&entry.category_name);
        state.next_entry_id += 1;
        let entry_id = state.next_entry_id;
        state.entries.push(FinanceEntry {
            id: entry_id,
            owner_user_id: owner_id,
            category_id,
            title: entry.title,
            amount: entry.amount,
            date: entry.date,
        });
        Ok(AddedEntry {
            entry_id,
            category_id,
        })
    }

    async fn list_entries(&self, owner_id: i32) -> Result<Vec<EntryView>, StoreError> {
        let state = self.state.read().await;
        // Entry ids are assigned in increasing order, so insertion order is id order
        state
            .entries
            .iter()
            .filter(|e| e.owner_user_id == owner_id)
            .map(|e| {
                let category = state
                    .categories
                    .iter()
                    .find(|c| c.id == e.category_id)
                    .ok_or_else(|| {
                        StoreError::CorruptRow(format!(
                            "entry {} references missing category {}",
                            e.id, e.category_id
                        ))
                    })?;
                Ok(EntryView {
                    entry_id: e.id,
                    title: e.title.clone(),
                    amount: e.amount,
                    date: e.date,
                    category_name: category.name.clone(),
                })
            })
            .collect()
    }

    async fn update_entry(
        &self,
        owner_id: i32,
        entry_id: i32,
        update: EntryUpdate,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state
            .entries
            .iter_mut()
            .find(|e| e.id == entry_id && e.owner_user_id == owner_id)
        {
            Some(entry) => {
                entry.category_id = update.category_id;
                entry.title = update.title;
                entry.amount = update.amount;
                entry.date = update.date;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_entry(&self, owner_id: i32, entry_id: i32) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let before = state.entries.len();
        state
            .entries
            .retain(|e| !(e.id == entry_id && e.owner_user_id == owner_id));
        Ok(state.entries.len() < before)
    }
}
