//! Core application layer
//!
//! This module provides the shared infrastructure of the service:
//! - Configuration management
//! - Structured logging system
//! - Error handling and type system

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{ErrorContext, ErrorResponse, Result, WardenError};
pub use logging::Logger;
