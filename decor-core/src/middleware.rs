use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::http::{Next, Request, Response};

/// Boxed future returned by middleware and bound handlers.
pub type BoxResponseFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

type MiddlewareFn = dyn Fn(Request, Next) -> BoxResponseFuture + Send + Sync;

/// A single unit of request processing placed in front of a route handler.
///
/// The wrapped function receives the request and the continuation
/// ([`Next`]). It may do work before and after `next.run(req).await`, or
/// return a response without calling it at all.
///
/// Handlers are reference-counted: the registry and every route chain that
/// uses a handler share the same function.
///
/// ```ignore
/// let timing = MiddlewareHandler::from_fn(|req, next| async move {
///     let started = std::time::Instant::now();
///     let resp = next.run(req).await;
///     tracing::info!(elapsed = ?started.elapsed(), "request done");
///     resp
/// });
/// ```
#[derive(Clone)]
pub struct MiddlewareHandler {
    name: &'static str,
    inner: Arc<MiddlewareFn>,
}

impl MiddlewareHandler {
    /// Wrap an async function `(Request, Next) -> Response`.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self {
            name: std::any::type_name::<F>(),
            inner: Arc::new(move |req: Request, next: Next| -> BoxResponseFuture {
                Box::pin(f(req, next))
            }),
        }
    }

    /// Attach a human-readable name, used in logs.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the middleware for one request.
    pub fn call(&self, req: Request, next: Next) -> BoxResponseFuture {
        (self.inner)(req, next)
    }

    /// Whether two handles point at the same middleware function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for MiddlewareHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MiddlewareHandler").field(&self.name).finish()
    }
}

/// Named-field wrapper around a middleware list.
///
/// Every middleware-accepting registration takes `impl Into<MiddlewareConfig>`,
/// so callers can pass a single handler, a `Vec` or array of handlers, or
/// this wrapper.
#[derive(Debug, Clone, Default)]
pub struct MiddlewareConfig {
    pub middleware: Vec<MiddlewareHandler>,
}

impl MiddlewareConfig {
    pub fn new(middleware: Vec<MiddlewareHandler>) -> Self {
        Self { middleware }
    }

    pub fn into_handlers(self) -> Vec<MiddlewareHandler> {
        self.middleware
    }
}

impl From<MiddlewareHandler> for MiddlewareConfig {
    fn from(handler: MiddlewareHandler) -> Self {
        Self::new(vec![handler])
    }
}

impl From<Vec<MiddlewareHandler>> for MiddlewareConfig {
    fn from(middleware: Vec<MiddlewareHandler>) -> Self {
        Self::new(middleware)
    }
}

impl<const N: usize> From<[MiddlewareHandler; N]> for MiddlewareConfig {
    fn from(middleware: [MiddlewareHandler; N]) -> Self {
        Self::new(middleware.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passthrough() -> MiddlewareHandler {
        MiddlewareHandler::from_fn(|req, next: Next| async move { next.run(req).await })
    }

    #[test]
    fn config_from_single_handler() {
        let cfg: MiddlewareConfig = passthrough().into();
        assert_eq!(cfg.middleware.len(), 1);
    }

    #[test]
    fn config_from_vec_and_array() {
        let from_vec: MiddlewareConfig = vec![passthrough(), passthrough()].into();
        let from_array: MiddlewareConfig = [passthrough(), passthrough(), passthrough()].into();
        assert_eq!(from_vec.into_handlers().len(), 2);
        assert_eq!(from_array.into_handlers().len(), 3);
    }

    #[test]
    fn clones_share_the_function() {
        let a = passthrough();
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&passthrough()));
    }

    #[test]
    fn named_overrides_the_default_name() {
        let mw = passthrough().named("auth");
        assert_eq!(mw.name(), "auth");
        assert_eq!(format!("{mw:?}"), "MiddlewareHandler(\"auth\")");
    }
}
