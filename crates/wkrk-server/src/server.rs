//! HTTP server implementation.
//!
//! This module provides the main [`WkrkServer`] struct for serving a route
//! table over HTTP.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;

use wkrk_common::{ServerConfigFile, ServerError};

use crate::context::Env;
use crate::router::build_router;
use crate::state::{AppState, HostedApp};

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server.
    pub bind_addr: SocketAddr,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Enable graceful shutdown on SIGTERM/SIGINT.
    pub graceful_shutdown: bool,
    /// Largest request body accepted.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8787)),
            request_timeout_secs: 30,
            graceful_shutdown: true,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Create a new server config with custom bind address.
    #[must_use]
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Create a new server config with custom timeout.
    #[must_use]
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Get the request timeout as Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl TryFrom<&ServerConfigFile> for ServerConfig {
    type Error = ServerError;

    fn try_from(file: &ServerConfigFile) -> Result<Self, Self::Error> {
        let bind_addr = file.bind_addr.parse().map_err(|e| {
            ServerError::invalid_config(format!("bind_addr '{}': {e}", file.bind_addr))
        })?;

        Ok(Self {
            bind_addr,
            request_timeout_secs: file.request_timeout_secs,
            graceful_shutdown: file.graceful_shutdown,
            max_body_bytes: file.max_body_bytes,
        })
    }
}

/// HTTP server hosting a route table.
///
/// # Example
///
/// ```ignore
/// use wkrk_core::{RouteEntry, RouteTable, Wkrk};
/// use wkrk_server::{Env, ServerConfig, WkrkServer};
///
/// let routes = RouteTable::new().route(
///     "/",
///     RouteEntry::new().get(|p| async move { Ok(p.res.send("Hello world!")) }),
/// );
///
/// let server = WkrkServer::new(Wkrk::new(routes), Env::default(), ServerConfig::default());
/// server.run().await?;
/// ```
pub struct WkrkServer {
    /// Application state.
    state: AppState,
    /// Server configuration.
    config: ServerConfig,
}

impl WkrkServer {
    /// Create a new server instance.
    pub fn new(app: HostedApp, env: Env, config: ServerConfig) -> Self {
        let state = AppState::new(app, env, config.max_body_bytes);
        Self { state, config }
    }

    /// Get a reference to the application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server until shutdown.
    ///
    /// This will block until the server is shut down via signal
    /// (SIGTERM/SIGINT) if graceful shutdown is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot bind to the address.
    pub async fn run(self) -> Result<(), ServerError> {
        let app = build_router(self.state, self.config.request_timeout());

        let listener = TcpListener::bind(&self.config.bind_addr)
            .await
            .map_err(|e| ServerError::bind(self.config.bind_addr, e))?;

        info!(addr = %self.config.bind_addr, "Starting HTTP server");

        if self.config.graceful_shutdown {
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        } else {
            axum::serve(listener, app).await?;
        }

        info!("Server shutdown complete");
        Ok(())
    }

    /// Start the server and return a handle for testing.
    ///
    /// The server binds to an ephemeral port (127.0.0.1:0) and
    /// returns a handle that can be used to get the actual address
    /// and shut down the server.
    pub async fn start_test(app: HostedApp, env: Env) -> Result<TestHandle, ServerError> {
        let config = ServerConfig::default();
        let state = AppState::new(app, env, config.max_body_bytes);
        let router = build_router(state.clone(), config.request_timeout());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| ServerError::bind("127.0.0.1:0", e))?;

        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(TestHandle {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
            handle,
        })
    }
}

/// Handle for a test server instance.
///
/// Use this to interact with and shut down a test server.
pub struct TestHandle {
    /// The address the server is bound to.
    addr: SocketAddr,
    /// Application state.
    state: AppState,
    /// Shutdown signal sender.
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    /// Server task handle.
    handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestHandle {
    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the server URL.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Shutdown the server gracefully.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use wkrk_core::{RouteTable, Wkrk};

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8787);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.graceful_shutdown);
        assert_eq!(config.max_body_bytes, 1_048_576);
    }

    #[test]
    fn test_server_config_builder() {
        let addr: SocketAddr = "127.0.0.1:3000".parse().unwrap();
        let config = ServerConfig::default()
            .with_bind_addr(addr)
            .with_timeout(60);

        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_server_config_from_file() {
        let file = ServerConfigFile {
            bind_addr: "127.0.0.1:9000".to_string(),
            request_timeout_secs: 5,
            graceful_shutdown: false,
            max_body_bytes: 512,
        };
        let config = ServerConfig::try_from(&file).unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.request_timeout_secs, 5);
        assert!(!config.graceful_shutdown);
        assert_eq!(config.max_body_bytes, 512);

        let bad = ServerConfigFile {
            bind_addr: "not-an-address".to_string(),
            ..ServerConfigFile::default()
        };
        let err = ServerConfig::try_from(&bad).unwrap_err();
        assert!(matches!(err, ServerError::InvalidConfig { .. }));
    }

    #[test]
    fn test_server_creation() {
        let server = WkrkServer::new(
            Wkrk::new(RouteTable::new()),
            Env::default(),
            ServerConfig::default(),
        );
        assert_eq!(server.state().app().routes().len(), 0);
        assert_eq!(server.config().bind_addr.port(), 8787);
    }
}
