use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::controller::Controller;
use crate::handler::RouteHandler;
use crate::http::{IntoResponse, Method, Request};
use crate::meta::{ControllerInfo, RouteInfo};
use crate::middleware::{MiddlewareConfig, MiddlewareHandler};
use crate::path::normalize;

// ── Records ────────────────────────────────────────────────────────────────

/// One route declared on a controller.
#[derive(Clone)]
pub struct RouteDescriptor {
    pub verb: Method,
    /// Normalized, relative to the controller's base path.
    pub path: String,
    pub handler_name: String,
    /// Method-level middleware, snapshotted when the route was added.
    pub middleware: Vec<MiddlewareHandler>,
    pub handler: RouteHandler,
}

impl RouteDescriptor {
    pub fn info(&self) -> RouteInfo {
        RouteInfo::new(self.verb.as_str(), self.path.clone(), self.handler_name.clone())
    }
}

impl fmt::Debug for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("verb", &self.verb)
            .field("path", &self.path)
            .field("handler_name", &self.handler_name)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

/// Everything registered for one controller type.
#[derive(Debug, Clone)]
pub struct ControllerRecord {
    type_name: &'static str,
    base_path: String,
    routes: Vec<RouteDescriptor>,
}

impl ControllerRecord {
    fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            base_path: String::new(),
            routes: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Routes in the order they were added.
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn info(&self) -> ControllerInfo {
        ControllerInfo {
            controller: self.type_name.to_string(),
            base_path: self.base_path.clone(),
            routes: self.routes.iter().map(RouteDescriptor::info).collect(),
        }
    }
}

/// Borrowed metadata for a controller, with defaults for unknown types.
#[derive(Debug, Clone, Copy)]
pub struct ControllerMetadata<'a> {
    pub base_path: &'a str,
    pub routes: &'a [RouteDescriptor],
}

// ── ControllerRegistry ─────────────────────────────────────────────────────

/// Store of controller and middleware metadata, keyed by controller type.
///
/// The registry is an ordinary owned value: build one at startup, fill it
/// through [`install`](Self::install), [`describe`](Self::describe) or the
/// low-level `set_base_path` / `add_route` / `add_*_middleware` calls, then
/// hand it to [`register_controllers`](crate::registrar::register_controllers).
#[derive(Default)]
pub struct ControllerRegistry {
    records: HashMap<TypeId, ControllerRecord>,
    class_middleware: HashMap<TypeId, Vec<MiddlewareHandler>>,
    method_middleware: HashMap<(TypeId, String), Vec<MiddlewareHandler>>,
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("controllers", &self.records.len())
            .field("class_middleware", &self.class_middleware.len())
            .field("method_middleware", &self.method_middleware.len())
            .finish()
    }
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the metadata a [`Controller`] describes about itself.
    pub fn install<C: Controller>(&mut self) -> &mut Self {
        C::describe(self);
        self
    }

    /// Set the base path of `C` and return a builder for its routes and
    /// middleware.
    pub fn describe<C: Send + Sync + 'static>(&mut self, base_path: &str) -> ControllerBuilder<'_, C> {
        self.set_base_path::<C>(base_path);
        ControllerBuilder {
            registry: self,
            _controller: PhantomData,
        }
    }

    /// Controller annotation: normalize and store the base path of `C`.
    ///
    /// The last call wins. Routes added earlier are kept.
    pub fn set_base_path<C: 'static>(&mut self, path: &str) {
        self.record_mut::<C>().base_path = normalize(path);
    }

    /// Route annotation: append a route to `C`.
    ///
    /// Method-level middleware registered for `handler_name` *before* this
    /// call is copied onto the route. Class-level middleware is not; the
    /// registrar adds it once, in front of the route's own.
    pub fn add_route<C, F, Fut, R>(&mut self, verb: Method, path: &str, handler_name: &str, handler: F)
    where
        C: Send + Sync + 'static,
        F: Fn(Arc<C>, Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        let middleware = self.method_middleware_of(TypeId::of::<C>(), handler_name).to_vec();
        let descriptor = RouteDescriptor {
            verb,
            path: normalize(path),
            handler_name: handler_name.to_string(),
            middleware,
            handler: RouteHandler::new(handler),
        };
        self.record_mut::<C>().routes.push(descriptor);
    }

    /// Middleware annotation on the controller type itself. Appends.
    pub fn add_class_middleware<C: 'static>(&mut self, middleware: impl Into<MiddlewareConfig>) {
        self.class_middleware
            .entry(TypeId::of::<C>())
            .or_default()
            .extend(middleware.into().into_handlers());
    }

    /// Middleware annotation on one controller method. Appends.
    pub fn add_method_middleware<C: 'static>(&mut self, method_name: &str, middleware: impl Into<MiddlewareConfig>) {
        self.method_middleware
            .entry((TypeId::of::<C>(), method_name.to_string()))
            .or_default()
            .extend(middleware.into().into_handlers());
    }

    /// Class-level middleware of `C`, followed by the method-level
    /// middleware of `method_name` when one is given.
    pub fn get_middleware<C: 'static>(&self, method_name: Option<&str>) -> Vec<MiddlewareHandler> {
        let type_id = TypeId::of::<C>();
        let mut handlers = self.class_middleware_of(type_id).to_vec();
        if let Some(name) = method_name {
            handlers.extend_from_slice(self.method_middleware_of(type_id, name));
        }
        handlers
    }

    /// Base path and routes of `C`; empty when nothing was registered.
    pub fn metadata<C: 'static>(&self) -> ControllerMetadata<'_> {
        match self.record_of(TypeId::of::<C>()) {
            Some(record) => ControllerMetadata {
                base_path: &record.base_path,
                routes: &record.routes,
            },
            None => ControllerMetadata {
                base_path: "",
                routes: &[],
            },
        }
    }

    pub fn record<C: 'static>(&self) -> Option<&ControllerRecord> {
        self.record_of(TypeId::of::<C>())
    }

    pub fn record_of(&self, type_id: TypeId) -> Option<&ControllerRecord> {
        self.records.get(&type_id)
    }

    pub fn class_middleware_of(&self, type_id: TypeId) -> &[MiddlewareHandler] {
        self.class_middleware
            .get(&type_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn method_middleware_of(&self, type_id: TypeId, method_name: &str) -> &[MiddlewareHandler] {
        self.method_middleware
            .get(&(type_id, method_name.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Snapshot of every controller, sorted by type name.
    pub fn controllers(&self) -> Vec<ControllerInfo> {
        let mut infos: Vec<_> = self.records.values().map(ControllerRecord::info).collect();
        infos.sort_by(|a, b| a.controller.cmp(&b.controller));
        infos
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record_mut<C: 'static>(&mut self) -> &mut ControllerRecord {
        self.records
            .entry(TypeId::of::<C>())
            .or_insert_with(|| ControllerRecord::new(type_name::<C>()))
    }
}

// ── ControllerBuilder ──────────────────────────────────────────────────────

/// Fluent registration for a single controller type.
///
/// ```ignore
/// registry
///     .describe::<Greeter>("/api")
///     .middleware(request_log())
///     .method_middleware("say_hello", require_token())
///     .get("/hello", "say_hello", |this: Arc<Greeter>, _req| async move {
///         this.greeting.clone()
///     });
/// ```
pub struct ControllerBuilder<'a, C> {
    registry: &'a mut ControllerRegistry,
    _controller: PhantomData<fn() -> C>,
}

macro_rules! verb_routes {
    ($($name:ident => $verb:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Add a `", stringify!($verb), "` route.")]
            pub fn $name<F, Fut, R>(self, path: &str, handler_name: &str, handler: F) -> Self
            where
                F: Fn(Arc<C>, Request) -> Fut + Send + Sync + 'static,
                Fut: Future<Output = R> + Send + 'static,
                R: IntoResponse + 'static,
            {
                self.route(Method::$verb, path, handler_name, handler)
            }
        )+
    };
}

impl<'a, C: Send + Sync + 'static> ControllerBuilder<'a, C> {
    /// Append class-level middleware.
    pub fn middleware(self, middleware: impl Into<MiddlewareConfig>) -> Self {
        self.registry.add_class_middleware::<C>(middleware);
        self
    }

    /// Append method-level middleware. Must come before the method's routes.
    pub fn method_middleware(self, method_name: &str, middleware: impl Into<MiddlewareConfig>) -> Self {
        self.registry.add_method_middleware::<C>(method_name, middleware);
        self
    }

    pub fn route<F, Fut, R>(self, verb: Method, path: &str, handler_name: &str, handler: F) -> Self
    where
        F: Fn(Arc<C>, Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        self.registry.add_route::<C, F, Fut, R>(verb, path, handler_name, handler);
        self
    }

    verb_routes! {
        get => GET,
        post => POST,
        put => PUT,
        delete => DELETE,
        patch => PATCH,
        head => HEAD,
        options => OPTIONS,
    }
}
