//! HTTP host for wkrk.
//!
//! This crate serves a [`wkrk_core::Wkrk`] route table over HTTP, playing
//! the role of the edge runtime. It handles:
//!
//! - Buffering request bodies (with a size limit)
//! - Creating the per-request [`Env`] and [`ExecutionContext`]
//! - Converting dispatch results back into HTTP responses
//! - Server lifecycle and graceful shutdown
//!
//! # Quick Start
//!
//! ```ignore
//! use wkrk_core::{RouteEntry, RouteTable, Wkrk};
//! use wkrk_server::{Env, ServerConfig, WkrkServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let routes = RouteTable::new().route(
//!         "/",
//!         RouteEntry::new().get(|p| async move { Ok(p.res.send("Hello world!")) }),
//!     );
//!
//!     let server = WkrkServer::new(Wkrk::new(routes), Env::default(), ServerConfig::default());
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod handler;
pub mod request;
pub mod response;
pub mod router;
pub mod server;
pub mod state;

pub use context::{Env, ExecutionContext};
pub use server::{ServerConfig, TestHandle, WkrkServer};
pub use state::{AppState, HostedApp};
