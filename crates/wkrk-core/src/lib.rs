//! Route table and request dispatcher for wkrk.
//!
//! This crate provides the routing core:
//! - [`RouteTable`]: Exact-match mapping from path to [`RouteEntry`]
//! - [`RouteEntry`]: Per-method handler slots with a `default` tier and a catch-all
//! - [`Wkrk`]: The `fetch` entry point dispatching requests to handlers
//! - [`ExtendedRequest`] / [`ExtendedResponse`]: Helpers handed to handlers
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 fetch(request, env, ctx)                │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                      RouteTable                         │
//! │  (Built once, read-only, shared across requests)        │
//! │  - exact path lookup        → 500 "Don't know how..."   │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                      RouteEntry                         │
//! │  - named slot → default slot → catch-all handler        │
//! │  - nothing resolved         → 500 "Unknown request..."  │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │      Handler(HandlerParams { req, res, request,         │
//! │                              env, ctx })                │
//! │  (Result returned to the caller unchanged)              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use wkrk_core::{RouteEntry, RouteTable, Wkrk};
//!
//! let routes = RouteTable::new().route(
//!     "/",
//!     RouteEntry::new().get(|p| async move { Ok(p.res.send("Hello world!")) }),
//! );
//! let app = Wkrk::new(routes);
//! let response = app.fetch(request, (), ()).await?;
//! ```

pub mod dispatch;
pub mod handler;
pub mod method;
pub mod request;
pub mod response;
pub mod route;

pub use dispatch::{Wkrk, dispatch, dispatch_with_format, resolve};
pub use handler::{BoxedHandler, Handler, HandlerParams, HandlerResult, handler_fn, sync};
pub use method::RouteMethod;
pub use request::{ExtendedRequest, Request};
pub use response::{ExtendedResponse, Response, ResponseError};
pub use route::{MethodSlots, RouteEntry, RouteTable};
