//! Shared application state.
//!
//! This module provides [`AppState`], which holds shared resources
//! across all HTTP request handlers.

use wkrk_core::Wkrk;

use crate::context::{Env, ExecutionContext};

/// Router type served by the HTTP host.
pub type HostedApp = Wkrk<Env, ExecutionContext>;

/// Shared state across all request handlers.
///
/// This struct is cloned for each request; the route table and the
/// environment are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Route table and dispatcher configuration.
    app: HostedApp,

    /// Environment forwarded to every handler.
    env: Env,

    /// Largest request body accepted.
    max_body_bytes: usize,
}

impl AppState {
    /// Create new application state.
    pub fn new(app: HostedApp, env: Env, max_body_bytes: usize) -> Self {
        Self {
            app,
            env,
            max_body_bytes,
        }
    }

    /// Get the router.
    pub fn app(&self) -> &HostedApp {
        &self.app
    }

    /// Get the environment.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Get the body size limit.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("routes_count", &self.app.routes().len())
            .field("vars_count", &self.env.len())
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}
