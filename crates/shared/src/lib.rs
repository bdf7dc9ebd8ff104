//! Shared types, errors, and configuration for Toko.
//!
//! This crate holds the pieces every other crate needs: typed IDs,
//! the application-level error type, and configuration loading.

pub mod config;
pub mod error;
pub mod types;

pub use config::LedgerConfig;
pub use error::{AppError, AppResult};
