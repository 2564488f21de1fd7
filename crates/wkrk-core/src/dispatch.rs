//! Request dispatcher.
//!
//! [`dispatch`] maps one inbound request to exactly one handler invocation,
//! or to a 500 response when routing fails. [`Wkrk`] bundles a route table
//! with its [`RouterConfig`] and exposes the edge-function style `fetch`
//! entry point.

use std::sync::Arc;

use tracing::{debug, warn};
use wkrk_common::{ErrorFormat, RouteError, RouterConfig};

use crate::handler::{BoxedHandler, HandlerParams, HandlerResult};
use crate::method::RouteMethod;
use crate::request::{ExtendedRequest, Request, request_path};
use crate::response::ExtendedResponse;
use crate::route::RouteTable;

/// Find the handler for a request.
///
/// # Errors
///
/// [`RouteError::UnknownPath`] if the path has no entry,
/// [`RouteError::UnknownMethod`] if the entry resolves no handler for the
/// method. The latter carries the method in its original spelling.
pub fn resolve<'a, E, C>(
    request: &Request,
    routes: &'a RouteTable<E, C>,
) -> Result<&'a BoxedHandler<E, C>, RouteError> {
    let path = request_path(request.uri());
    let entry = routes
        .get(path)
        .ok_or_else(|| RouteError::unknown_path(path))?;

    let method = request.method().as_str();
    entry
        .resolve(&RouteMethod::parse(method))
        .ok_or_else(|| RouteError::unknown_method(method))
}

/// Dispatch a request with plain-text routing errors.
pub async fn dispatch<E, C>(
    request: Request,
    routes: &RouteTable<E, C>,
    env: E,
    ctx: C,
) -> HandlerResult
where
    E: 'static,
    C: 'static,
{
    dispatch_with_format(request, routes, ErrorFormat::PlainText, env, ctx).await
}

/// Dispatch a request.
///
/// Routing failures become `Ok` 500 responses built by
/// [`ExtendedResponse::error`]. Whatever the handler returns, including
/// `Err`, is passed back unchanged.
pub async fn dispatch_with_format<E, C>(
    request: Request,
    routes: &RouteTable<E, C>,
    error_format: ErrorFormat,
    env: E,
    ctx: C,
) -> HandlerResult
where
    E: 'static,
    C: 'static,
{
    let res = ExtendedResponse::for_request(&request, error_format);

    let handler = match resolve(&request, routes) {
        Ok(handler) => handler,
        Err(err) => {
            warn!(
                path = request_path(request.uri()),
                method = %request.method(),
                error = %err,
                "Routing failed"
            );
            return Ok(res.error(&err.to_string()));
        }
    };

    debug!(
        path = request_path(request.uri()),
        method = %request.method(),
        "Dispatching to handler"
    );

    let request = Arc::new(request);
    let params = HandlerParams {
        req: ExtendedRequest::new(Arc::clone(&request)),
        res,
        request,
        env,
        ctx,
    };

    handler.call(params).await
}

/// A route table ready to serve requests.
///
/// Cloning is cheap; the table is shared.
pub struct Wkrk<E = (), C = ()> {
    routes: Arc<RouteTable<E, C>>,
    config: RouterConfig,
}

impl<E, C> Wkrk<E, C>
where
    E: 'static,
    C: 'static,
{
    /// Create a router with the default configuration.
    pub fn new(routes: RouteTable<E, C>) -> Self {
        Self::with_config(routes, RouterConfig::default())
    }

    /// Create a router with an explicit configuration.
    pub fn with_config(routes: RouteTable<E, C>, config: RouterConfig) -> Self {
        Self {
            routes: Arc::new(routes),
            config,
        }
    }

    /// The route table.
    pub fn routes(&self) -> &RouteTable<E, C> {
        &self.routes
    }

    /// The router configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Handle one inbound request.
    ///
    /// `env` and `ctx` are forwarded to the handler untouched.
    pub async fn fetch(&self, request: Request, env: E, ctx: C) -> HandlerResult {
        dispatch_with_format(request, &self.routes, self.config.error_format, env, ctx).await
    }
}

impl<E, C> Clone for Wkrk<E, C> {
    fn clone(&self) -> Self {
        Self {
            routes: Arc::clone(&self.routes),
            config: self.config.clone(),
        }
    }
}

impl<E, C> std::fmt::Debug for Wkrk<E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wkrk")
            .field("routes", &self.routes.len())
            .field("config", &self.config)
            .finish()
    }
}
