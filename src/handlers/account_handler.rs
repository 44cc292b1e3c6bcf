//! Account Handler
//!
//! Signup, login and identity resolution.

use crate::auth::{Identity, PasswordService, TokenService};
use crate::domain::{
    check_length, normalize_email, validate_email, validate_password, DomainError, NewUser,
    OperationContext, User, MAX_NAME_LEN, MAX_TEXT_LEN,
};
use crate::error::AppError;
use crate::state::AppState;
use crate::store::SharedStore;

use super::{LoginCommand, SignupCommand, SignupResult};

/// Handler for account operations
pub struct AccountHandler {
    store: SharedStore,
    passwords: PasswordService,
    tokens: std::sync::Arc<TokenService>,
}

impl AccountHandler {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            passwords: state.passwords.clone(),
            tokens: state.tokens.clone(),
        }
    }

    /// Register a user. Input is trimmed and the email lowercased first.
    pub async fn signup(
        &self,
        command: SignupCommand,
        context: &OperationContext,
    ) -> Result<SignupResult, AppError> {
        let first_name = command.first_name.trim().to_string();
        let last_name = command.last_name.trim().to_string();
        let email = normalize_email(&command.email);
        let password = command.password.trim().to_string();

        if first_name.is_empty() {
            return Err(DomainError::MissingField("firstName").into());
        }
        if last_name.is_empty() {
            return Err(DomainError::MissingField("lastName").into());
        }
        check_length("firstName", &first_name, MAX_NAME_LEN)?;
        check_length("lastName", &last_name, MAX_NAME_LEN)?;
        check_length("email", &email, MAX_TEXT_LEN)?;
        if !validate_email(&email) {
            return Err(DomainError::InvalidEmail.into());
        }
        if !validate_password(&password) {
            return Err(DomainError::WeakPassword.into());
        }

        // Skip the hashing cost for an obvious duplicate; the insert itself
        // still enforces uniqueness.
        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::EmailAlreadyRegistered);
        }

        let password_hash = self.hash_password(password).await?;

        let user_id = self
            .store
            .create_user(NewUser {
                first_name,
                last_name,
                email: email.clone(),
                password_hash,
            })
            .await?;

        tracing::info!(
            request_id = context.request_id_or_dash(),
            user_id,
            "User registered"
        );

        Ok(SignupResult { user_id, email })
    }

    /// Check credentials and issue a bearer token
    pub async fn login(
        &self,
        command: LoginCommand,
        context: &OperationContext,
    ) -> Result<String, AppError> {
        let email = normalize_email(&command.email);
        let password = command.password.trim().to_string();

        if email.is_empty() || password.is_empty() {
            return Err(AppError::InvalidCredentials);
        }

        let user = match self.store.find_user_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::info!(
                    request_id = context.request_id_or_dash(),
                    "Login rejected: unknown email"
                );
                return Err(AppError::InvalidCredentials);
            }
        };

        if !self.verify_password(user.password_hash, password).await? {
            tracing::info!(
                request_id = context.request_id_or_dash(),
                user_id = user.id,
                "Login rejected: wrong password"
            );
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.email)?;
        tracing::info!(
            request_id = context.request_id_or_dash(),
            user_id = user.id,
            "Login successful"
        );
        Ok(token)
    }

    /// Map a verified identity back to its user, on every request
    pub async fn resolve_user(&self, identity: &Identity) -> Result<User, AppError> {
        self.store
            .find_user_by_email(&identity.email)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let passwords = self.passwords.clone();
        let hash = tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("password hashing task failed: {e}")))??;
        Ok(hash)
    }

    async fn verify_password(&self, stored_hash: String, password: String) -> Result<bool, AppError> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.verify(&stored_hash, &password))
            .await
            .map_err(|e| AppError::Internal(format!("password verification task failed: {e}")))
    }
}
