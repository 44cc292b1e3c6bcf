//! Entry Handler
//!
//! Owner-scoped finance entry operations. The owner is always resolved from
//! the caller's identity, never taken from the request.

use crate::auth::Identity;
use crate::domain::{AddedEntry, EntryUpdate, EntryView, NewEntry, OperationContext};
use crate::error::AppError;
use crate::state::AppState;
use crate::store::SharedStore;

use super::{AccountHandler, AddEntryCommand, EditEntryCommand};

/// Handler for finance entries and categories
pub struct EntryHandler {
    store: SharedStore,
    accounts: AccountHandler,
}

impl EntryHandler {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            accounts: AccountHandler::new(state),
        }
    }

    /// Validate, then resolve the category and insert the entry
    pub async fn add(
        &self,
        identity: &Identity,
        command: AddEntryCommand,
        context: &OperationContext,
    ) -> Result<AddedEntry, AppError> {
        let amount = command.amount.to_integer()?;
        let entry = NewEntry::new(command.title, command.category_name, amount, command.date)?;

        let owner = self.accounts.resolve_user(identity).await?;
        let added = self.store.add_entry(owner.id, entry).await?;

        tracing::info!(
            request_id = context.request_id_or_dash(),
            user_id = owner.id,
            entry_id = added.entry_id,
            category_id = added.category_id,
            "Finance entry added"
        );
        Ok(added)
    }

    /// Entries owned by the caller, ascending by id
    pub async fn list(&self, identity: &Identity) -> Result<Vec<EntryView>, AppError> {
        let owner = self.accounts.resolve_user(identity).await?;
        Ok(self.store.list_entries(owner.id).await?)
    }

    /// Replace an owned entry's fields. The category must already exist.
    pub async fn edit(
        &self,
        identity: &Identity,
        command: EditEntryCommand,
        context: &OperationContext,
    ) -> Result<(), AppError> {
        let amount = command.amount.to_number()?;
        let update = EntryUpdate::new(command.category_id, command.title, amount, command.date)?;

        let owner = self.accounts.resolve_user(identity).await?;

        if !self.store.category_exists(update.category_id).await? {
            return Err(AppError::CategoryNotFound(update.category_id));
        }

        if !self
            .store
            .update_entry(owner.id, command.entry_id, update)
            .await?
        {
            return Err(AppError::EntryNotFound(command.entry_id));
        }

        tracing::info!(
            request_id = context.request_id_or_dash(),
            user_id = owner.id,
            entry_id = command.entry_id,
            "Finance entry updated"
        );
        Ok(())
    }

    /// Delete an owned entry
    pub async fn delete(
        &self,
        identity: &Identity,
        entry_id: i32,
        context: &OperationContext,
    ) -> Result<(), AppError> {
        let owner = self.accounts.resolve_user(identity).await?;

        if !self.store.delete_entry(owner.id, entry_id).await? {
            return Err(AppError::EntryNotFound(entry_id));
        }

        tracing::info!(
            request_id = context.request_id_or_dash(),
            user_id = owner.id,
            entry_id,
            "Finance entry deleted"
        );
        Ok(())
    }

    /// Names of every category, shared across users
    pub async fn categories(&self) -> Result<Vec<String>, AppError> {
        Ok(self.store.list_category_names().await?)
    }
}
