//! Route handler abstraction.
//!
//! A [`Handler`] receives a single [`HandlerParams`] bag and produces a
//! response asynchronously. Any `Fn(HandlerParams<E, C>) -> impl Future`
//! closure is a handler; synchronous closures can be adapted with [`sync`].

use std::future::{Future, Ready, ready};
use std::sync::Arc;

use async_trait::async_trait;
use wkrk_common::HandlerError;

use crate::request::{ExtendedRequest, Request};
use crate::response::{ExtendedResponse, Response};

/// Result produced by a handler.
pub type HandlerResult = Result<Response, HandlerError>;

/// Shared, type-erased handler stored in a route table.
pub type BoxedHandler<E, C> = Arc<dyn Handler<E, C>>;

/// Parameters passed to a handler on invocation.
///
/// `E` is the environment and `C` the execution context supplied by the
/// host to `fetch`; the router forwards both without looking at them.
#[derive(Debug)]
pub struct HandlerParams<E = (), C = ()> {
    /// Request wrapper.
    pub req: ExtendedRequest,
    /// Response helper.
    pub res: ExtendedResponse,
    /// The raw inbound request.
    pub request: Arc<Request>,
    /// Host environment.
    pub env: E,
    /// Host execution context.
    pub ctx: C,
}

/// Asynchronous request handler.
#[async_trait]
pub trait Handler<E, C>: Send + Sync + 'static {
    /// Produce a response for the request carried by `params`.
    async fn call(&self, params: HandlerParams<E, C>) -> HandlerResult;
}

#[async_trait]
impl<E, C, F, Fut> Handler<E, C> for F
where
    E: Send + 'static,
    C: Send + 'static,
    F: Fn(HandlerParams<E, C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn call(&self, params: HandlerParams<E, C>) -> HandlerResult {
        (self)(params).await
    }
}

/// Box an async closure into a [`BoxedHandler`].
pub fn handler_fn<E, C, F, Fut>(f: F) -> BoxedHandler<E, C>
where
    E: Send + 'static,
    C: Send + 'static,
    F: Fn(HandlerParams<E, C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(f)
}

/// Adapt a synchronous closure into a handler.
///
/// ```ignore
/// let entry = RouteEntry::new().get(sync(|p| Ok(p.res.send("Hello world!"))));
/// ```
pub fn sync<E, C, F>(
    f: F,
) -> impl Fn(HandlerParams<E, C>) -> Ready<HandlerResult> + Send + Sync + 'static
where
    E: 'static,
    C: 'static,
    F: Fn(HandlerParams<E, C>) -> HandlerResult + Send + Sync + 'static,
{
    move |params| ready(f(params))
}
