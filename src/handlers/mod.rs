//! Command Handlers module
//!
//! Handlers validate commands, resolve the acting user and coordinate the
//! store. Each is built per request from the shared application state.

mod account_handler;
mod commands;
mod entry_handler;

#[cfg(test)]
mod tests;

pub use account_handler::AccountHandler;
pub use commands::*;
pub use entry_handler::EntryHandler;
