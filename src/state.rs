//! Application state
//!
//! Read-only after startup and shared by every request.

use std::sync::Arc;

use crate::auth::{AuthError, PasswordService, TokenService};
use crate::config::Config;
use crate::store::SharedStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub passwords: PasswordService,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(store: SharedStore, passwords: PasswordService, tokens: TokenService) -> Self {
        Self {
            store,
            passwords,
            tokens: Arc::new(tokens),
        }
    }

    /// Build state from configuration around an already opened store
    pub fn from_config(config: &Config, store: SharedStore) -> Result<Self, AuthError> {
        let passwords = PasswordService::new(&config.password_hashing)?;
        let tokens = TokenService::new(&config.jwt_secret);
        Ok(Self::new(store, passwords, tokens))
    }
}
