//! financeTracker Library
//!
//! Re-exports modules for the server binary and integration testing.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
mod error;
pub mod handlers;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, ErrorResponse};
pub use state::AppState;
