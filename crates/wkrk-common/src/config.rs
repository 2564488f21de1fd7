//! Configuration structures for wkrk.
//!
//! - [`RouterConfig`]: Dispatcher behaviour
//! - [`ErrorFormat`]: Body format of routing error responses

use serde::{Deserialize, Serialize};

/// Dispatcher configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouterConfig {
    /// Format of the bodies produced for routing failures.
    #[serde(default)]
    pub error_format: ErrorFormat,
}

/// Body format used for routing error responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorFormat {
    /// Always answer with a `text/plain` body containing the message.
    #[default]
    PlainText,

    /// Answer with `{"error": message}` when the request itself declares an
    /// `application/json` content type, plain text otherwise.
    Json,
}

impl ErrorFormat {
    /// Returns `true` if JSON negotiation is enabled.
    pub fn negotiates_json(self) -> bool {
        matches!(self, Self::Json)
    }
}
