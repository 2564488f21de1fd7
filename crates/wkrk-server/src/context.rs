//! Per-request values handed to handlers by the HTTP host.
//!
//! - [`Env`]: Immutable variables from the `[vars]` table, shared by all requests
//! - [`ExecutionContext`]: Identity and timing of the current request

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

/// Environment visible to handlers.
///
/// Cloning is cheap; the variables are shared.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: Arc<BTreeMap<String, String>>,
}

impl Env {
    /// Create an environment from a set of variables.
    pub fn new(vars: BTreeMap<String, String>) -> Self {
        Self {
            vars: Arc::new(vars),
        }
    }

    /// Look up a variable.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if no variable is set.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Execution context of a single request.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Unique request identifier.
    pub request_id: String,
    /// When the host received the request.
    pub received_at: Instant,
}

impl ExecutionContext {
    /// Create a context with a fresh request id.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            received_at: Instant::now(),
        }
    }

    /// Time spent since the request was received.
    pub fn elapsed(&self) -> Duration {
        self.received_at.elapsed()
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}
