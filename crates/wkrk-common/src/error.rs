//! Error types for wkrk.
//!
//! This module defines the error types shared across the workspace:
//! - [`RouteError`]: Routing failures produced by the dispatcher
//! - [`HandlerError`]: Failures raised by user handlers (propagated untouched)
//! - [`ServerError`]: Failures of the HTTP host

use std::io;

use thiserror::Error;

/// Error type returned by route handlers.
///
/// The dispatcher never inspects or recovers these; they travel back to the
/// caller of `fetch` exactly as the handler produced them.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Routing failures.
///
/// These never escape the dispatcher as errors. Their `Display` output is
/// the body of the 500 response produced for the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No route table entry exists for the request path.
    #[error("Don't know how to handle the {path} path. Check your routes configuration.")]
    UnknownPath {
        /// The path component of the request URL.
        path: String,
    },

    /// The path exists but no handler resolves for the request method.
    #[error("Unknown request method: {method}")]
    UnknownMethod {
        /// The request method, in its original spelling.
        method: String,
    },
}

impl RouteError {
    /// Create a new `UnknownPath` error.
    pub fn unknown_path(path: impl Into<String>) -> Self {
        Self::UnknownPath { path: path.into() }
    }

    /// Create a new `UnknownMethod` error.
    pub fn unknown_method(method: impl Into<String>) -> Self {
        Self::UnknownMethod {
            method: method.into(),
        }
    }
}

/// HTTP host errors.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The listener could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// The address that was requested.
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The server loop terminated with an I/O error.
    #[error("Server error: {0}")]
    Serve(#[from] io::Error),

    /// Invalid configuration was provided.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },
}

impl ServerError {
    /// Create a new `Bind` error.
    pub fn bind(addr: impl ToString, source: io::Error) -> Self {
        Self::Bind {
            addr: addr.to_string(),
            source,
        }
    }

    /// Create a new `InvalidConfig` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_path_message() {
        let err = RouteError::unknown_path("/missing");
        assert_eq!(
            err.to_string(),
            "Don't know how to handle the /missing path. Check your routes configuration."
        );
        assert!(matches!(err, RouteError::UnknownPath { .. }));
    }

    #[test]
    fn test_unknown_method_keeps_spelling() {
        let err = RouteError::unknown_method("PATCH");
        assert_eq!(err.to_string(), "Unknown request method: PATCH");
        assert!(matches!(err, RouteError::UnknownMethod { .. }));
    }

    #[test]
    fn test_server_error_display() {
        let err = ServerError::bind(
            "127.0.0.1:1",
            io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        );
        assert_eq!(err.to_string(), "Failed to bind 127.0.0.1:1: in use");

        let err = ServerError::invalid_config("bad bind address");
        assert_eq!(err.to_string(), "Invalid configuration: bad bind address");
    }

    #[test]
    fn test_handler_error_from_str() {
        let err: HandlerError = "boom".into();
        assert_eq!(err.to_string(), "boom");
    }
}
