//! Warden Backend Library
//!
//! This library provides the core functionality for the Warden authentication
//! backend, including user persistence, credential handling, token issuance,
//! and the REST API service.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;

// Re-export commonly used types
pub use api::ApiServer;
pub use crate::core::Config;
pub use db::DatabaseManager;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for the library
pub type Result<T> = anyhow::Result<T>;
