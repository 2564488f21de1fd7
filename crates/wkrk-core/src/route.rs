//! Route table and per-path handler slots.
//!
//! A [`RouteTable`] maps exact paths to [`RouteEntry`] values. Each entry
//! has a slot per named method, a catch-all `handler`, and an optional
//! `default` record with the same shape that acts as a second lookup tier.
//!
//! Resolution order for `get`, `post`, `put` and `delete`:
//! 1. the entry's named slot
//! 2. the `default` record's named slot
//! 3. the entry's catch-all `handler`
//!
//! Any other method goes straight to the entry's catch-all `handler`.

use std::collections::HashMap;
use std::future::Future;

use crate::handler::{BoxedHandler, HandlerParams, HandlerResult, handler_fn};
use crate::method::RouteMethod;

/// Handler slots for one path.
///
/// Used both for the top level of a [`RouteEntry`] and for its `default`
/// record. All slots are optional.
pub struct MethodSlots<E = (), C = ()> {
    get: Option<BoxedHandler<E, C>>,
    post: Option<BoxedHandler<E, C>>,
    put: Option<BoxedHandler<E, C>>,
    delete: Option<BoxedHandler<E, C>>,
    handler: Option<BoxedHandler<E, C>>,
}

/// Generates a builder method per slot, each taking an async closure.
macro_rules! slot_setters {
    ($($(#[$doc:meta])* $name:ident;)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name<F, Fut>(mut self, handler: F) -> Self
            where
                F: Fn(HandlerParams<E, C>) -> Fut + Send + Sync + 'static,
                Fut: Future<Output = HandlerResult> + Send + 'static,
            {
                self.$name = Some(handler_fn(handler));
                self
            }
        )*
    };
}

impl<E, C> MethodSlots<E, C>
where
    E: Send + 'static,
    C: Send + 'static,
{
    /// Create an empty set of slots.
    pub fn new() -> Self {
        Self {
            get: None,
            post: None,
            put: None,
            delete: None,
            handler: None,
        }
    }

    slot_setters! {
        /// Handle `GET` requests.
        get;
        /// Handle `POST` requests.
        post;
        /// Handle `PUT` requests.
        put;
        /// Handle `DELETE` requests.
        delete;
        /// Handle any method not served by a more specific slot.
        handler;
    }

    /// Set a slot from an already boxed handler.
    ///
    /// `RouteMethod::Other` targets the catch-all slot.
    #[must_use]
    pub fn with_boxed(mut self, method: &RouteMethod, handler: BoxedHandler<E, C>) -> Self {
        let slot = match method {
            RouteMethod::Get => &mut self.get,
            RouteMethod::Post => &mut self.post,
            RouteMethod::Put => &mut self.put,
            RouteMethod::Delete => &mut self.delete,
            RouteMethod::Other(_) => &mut self.handler,
        };
        *slot = Some(handler);
        self
    }
}

impl<E, C> MethodSlots<E, C> {
    /// Slot for a named method. Always `None` for `RouteMethod::Other`.
    pub fn named(&self, method: &RouteMethod) -> Option<&BoxedHandler<E, C>> {
        match method {
            RouteMethod::Get => self.get.as_ref(),
            RouteMethod::Post => self.post.as_ref(),
            RouteMethod::Put => self.put.as_ref(),
            RouteMethod::Delete => self.delete.as_ref(),
            RouteMethod::Other(_) => None,
        }
    }

    /// The catch-all slot.
    pub fn catch_all(&self) -> Option<&BoxedHandler<E, C>> {
        self.handler.as_ref()
    }
}

impl<E, C> Default for MethodSlots<E, C>
where
    E: Send + 'static,
    C: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C> std::fmt::Debug for MethodSlots<E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodSlots")
            .field("get", &self.get.is_some())
            .field("post", &self.post.is_some())
            .field("put", &self.put.is_some())
            .field("delete", &self.delete.is_some())
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// Handlers registered for one path.
pub struct RouteEntry<E = (), C = ()> {
    slots: MethodSlots<E, C>,
    default: Option<MethodSlots<E, C>>,
}

impl<E, C> RouteEntry<E, C>
where
    E: Send + 'static,
    C: Send + 'static,
{
    /// Create an entry with no handlers.
    ///
    /// An empty entry is valid; every request to it fails method resolution.
    pub fn new() -> Self {
        Self {
            slots: MethodSlots::new(),
            default: None,
        }
    }

    /// Handle `GET` requests.
    #[must_use]
    pub fn get<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(HandlerParams<E, C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.slots = self.slots.get(handler);
        self
    }

    /// Handle `POST` requests.
    #[must_use]
    pub fn post<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(HandlerParams<E, C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.slots = self.slots.post(handler);
        self
    }

    /// Handle `PUT` requests.
    #[must_use]
    pub fn put<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(HandlerParams<E, C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.slots = self.slots.put(handler);
        self
    }

    /// Handle `DELETE` requests.
    #[must_use]
    pub fn delete<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(HandlerParams<E, C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.slots = self.slots.delete(handler);
        self
    }

    /// Handle every method not served by a named slot or the default record.
    #[must_use]
    pub fn handler<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(HandlerParams<E, C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.slots = self.slots.handler(handler);
        self
    }

    /// Set the `default` record, consulted after the named slots.
    ///
    /// Only its named slots take part in resolution.
    #[must_use]
    pub fn with_default(mut self, slots: MethodSlots<E, C>) -> Self {
        self.default = Some(slots);
        self
    }
}

impl<E, C> RouteEntry<E, C> {
    /// Build an entry from explicit slot records.
    pub fn from_slots(slots: MethodSlots<E, C>, default: Option<MethodSlots<E, C>>) -> Self {
        Self { slots, default }
    }

    /// Resolve the handler for a request method.
    pub fn resolve(&self, method: &RouteMethod) -> Option<&BoxedHandler<E, C>> {
        if !method.is_named() {
            return self.slots.catch_all();
        }

        self.slots
            .named(method)
            .or_else(|| self.default.as_ref().and_then(|d| d.named(method)))
            .or_else(|| self.slots.catch_all())
    }
}

impl<E, C> Default for RouteEntry<E, C>
where
    E: Send + 'static,
    C: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C> std::fmt::Debug for RouteEntry<E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEntry")
            .field("slots", &self.slots)
            .field("default", &self.default)
            .finish()
    }
}

/// Exact-match mapping from path to [`RouteEntry`].
///
/// Built once at startup and read-only afterwards.
pub struct RouteTable<E = (), C = ()> {
    routes: HashMap<String, RouteEntry<E, C>>,
}

impl<E, C> RouteTable<E, C> {
    /// Create an empty route table.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Register `entry` under `path`, replacing any previous entry.
    #[must_use]
    pub fn route(mut self, path: impl Into<String>, entry: RouteEntry<E, C>) -> Self {
        self.routes.insert(path.into(), entry);
        self
    }

    /// Look up the entry for an exact path.
    pub fn get(&self, path: &str) -> Option<&RouteEntry<E, C>> {
        self.routes.get(path)
    }

    /// Returns `true` if `path` has an entry.
    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// Registered paths, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Number of registered paths.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no path is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<E, C> Default for RouteTable<E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C, P: Into<String>> FromIterator<(P, RouteEntry<E, C>)> for RouteTable<E, C> {
    fn from_iter<I: IntoIterator<Item = (P, RouteEntry<E, C>)>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().map(|(p, e)| (p.into(), e)).collect(),
        }
    }
}

impl<E, C> std::fmt::Debug for RouteTable<E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.routes.iter()).finish()
    }
}
