//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::auth::AuthError;
use crate::store::StoreError;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Entry not found: {0}")]
    EntryNotFound(i32),

    #[error("Category not found: {0}")]
    CategoryNotFound(i32),

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    // Domain errors
    #[error(transparent)]
    Domain(#[from] crate::domain::DomainError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    // Server errors (5xx)
    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AppError::EmailAlreadyRegistered,
            other => AppError::Store(other),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Message returned for every 5xx response
const OPAQUE_SERVER_ERROR: &str = "Internal server error";

impl AppError {
    /// HTTP status and machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::Domain(_) => (StatusCode::BAD_REQUEST, "validation_error"),

            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            AppError::MissingToken => (StatusCode::UNAUTHORIZED, "missing_token"),
            AppError::Auth(AuthError::InvalidToken) => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::Auth(AuthError::TokenExpired) => (StatusCode::UNAUTHORIZED, "token_expired"),

            AppError::UserNotFound => (StatusCode::NOT_FOUND, "user_not_found"),
            AppError::EntryNotFound(_) => (StatusCode::NOT_FOUND, "entry_not_found"),
            AppError::CategoryNotFound(_) => (StatusCode::NOT_FOUND, "category_not_found"),

            AppError::EmailAlreadyRegistered => (StatusCode::CONFLICT, "email_exists"),

            AppError::Auth(_) => (StatusCode::INTERNAL_SERVER_ERROR, "auth_error"),
            AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let body = if status.is_server_error() {
            tracing::error!(error_code, "{:?}", self);
            ErrorResponse {
                error: OPAQUE_SERVER_ERROR.to_string(),
                error_code: error_code.to_string(),
                details: None,
            }
        } else {
            let details = match &self {
                AppError::InvalidRequest(msg) => Some(msg.clone()),
                _ => None,
            };
            let error = match &self {
                AppError::InvalidRequest(_) => "Invalid request".to_string(),
                other => other.to_string(),
            };
            ErrorResponse {
                error,
                error_code: error_code.to_string(),
                details,
            }
        };

        (status, Json(body)).into_response()
    }
}
