use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::http::{IntoResponse, Request};
use crate::middleware::BoxResponseFuture;

/// A controller instance, type-erased so heterogeneous controllers can flow
/// through the same registrar.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// A route handler bound to a concrete controller instance.
pub type BoundHandler = Arc<dyn Fn(Request) -> BoxResponseFuture + Send + Sync>;

type BindFn = dyn Fn(Instance) -> Option<BoundHandler> + Send + Sync;

/// Reference to a controller method, stored on the route descriptor.
///
/// The handler is written against the concrete controller type `C` and is
/// bound to an instance at registration time via [`RouteHandler::bind`].
/// Binding fails (returns `None`) only when the instance is not a `C`.
#[derive(Clone)]
pub struct RouteHandler {
    controller: TypeId,
    controller_name: &'static str,
    bind: Arc<BindFn>,
}

impl RouteHandler {
    /// Build a handler from a function taking the controller instance and
    /// the request.
    ///
    /// ```ignore
    /// RouteHandler::new(|this: Arc<Greeter>, _req| async move {
    ///     this.greeting.clone()
    /// })
    /// ```
    pub fn new<C, F, Fut, R>(f: F) -> Self
    where
        C: Send + Sync + 'static,
        F: Fn(Arc<C>, Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        let f = Arc::new(f);
        Self {
            controller: TypeId::of::<C>(),
            controller_name: type_name::<C>(),
            bind: Arc::new(move |instance: Instance| {
                let this = instance.downcast::<C>().ok()?;
                let f = f.clone();
                let bound: BoundHandler = Arc::new(move |req: Request| -> BoxResponseFuture {
                    let fut = f(this.clone(), req);
                    Box::pin(async move { fut.await.into_response() })
                });
                Some(bound)
            }),
        }
    }

    /// Bind this handler to `instance`, fixing the receiver for every
    /// request the router later dispatches.
    pub fn bind(&self, instance: Instance) -> Option<BoundHandler> {
        (self.bind)(instance)
    }

    pub fn controller(&self) -> TypeId {
        self.controller
    }

    pub fn controller_name(&self) -> &'static str {
        self.controller_name
    }
}

impl fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteHandler")
            .field("controller", &self.controller_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Body;

    struct Greeter {
        greeting: &'static str,
    }

    struct Other;

    fn greet() -> RouteHandler {
        RouteHandler::new(|this: Arc<Greeter>, _req| async move { this.greeting })
    }

    #[test]
    fn records_the_controller_type() {
        let handler = greet();
        assert_eq!(handler.controller(), TypeId::of::<Greeter>());
        assert!(handler.controller_name().ends_with("Greeter"));
    }

    #[test]
    fn bind_rejects_a_foreign_instance() {
        let instance: Instance = Arc::new(Other);
        assert!(greet().bind(instance).is_none());
    }

    #[tokio::test]
    async fn bound_handler_uses_the_instance() {
        let instance: Instance = Arc::new(Greeter { greeting: "hi" });
        let bound = greet().bind(instance).unwrap();

        let req = axum::http::Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let resp = bound(req).await;
        let bytes = http_body_util::BodyExt::collect(resp.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&bytes[..], b"hi");
    }
}
