//! Common types, errors, and configuration for wkrk.
//!
//! This crate provides shared functionality used across the wkrk workspace:
//! - Error types using `thiserror` for type-safe error handling
//! - Configuration structures for the dispatcher and the HTTP host

pub mod config;
pub mod config_file;
pub mod error;

pub use config::{ErrorFormat, RouterConfig};
pub use config_file::{ConfigFile, ConfigFileError, ServerConfigFile};
pub use error::{HandlerError, RouteError, ServerError};
