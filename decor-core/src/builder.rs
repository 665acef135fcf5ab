use std::convert::Infallible;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::DecorConfig;
use crate::container::{Container, ResolveError};
use crate::controller::{Controller, ControllerClass};
use crate::http::body::Body;
use crate::http::middleware::from_fn;
use crate::http::response::IntoResponse;
use crate::http::routing::Route;
use crate::http::{HttpRequest, Next, Request, Router, StatusCode};
use crate::middleware::{MiddlewareConfig, MiddlewareHandler};
use crate::registrar::{register_controllers, RegisterOptions};
use crate::registry::ControllerRegistry;

type LayerFn = Box<dyn FnOnce(Router) -> Router + Send>;

/// Builder for assembling a decor application.
///
/// Collects controllers, an optional container, global middleware and Tower
/// layers, then produces an `axum::Router` (or starts serving directly).
///
/// ```ignore
/// AppBuilder::new()
///     .with_config(DecorConfig::load("dev")?)
///     .middleware(request_log())
///     .register::<UserController>()
///     .with_trace()
///     .serve_from_config()
///     .await?;
/// ```
pub struct AppBuilder {
    config: Option<DecorConfig>,
    registry: ControllerRegistry,
    controllers: Vec<ControllerClass>,
    container: Option<Arc<dyn Container>>,
    global_middleware: Vec<MiddlewareHandler>,
    routes: Vec<Router>,
    custom_layers: Vec<LayerFn>,
    normalize_path: bool,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            registry: ControllerRegistry::new(),
            controllers: Vec::new(),
            container: None,
            global_middleware: Vec::new(),
            routes: Vec::new(),
            custom_layers: Vec::new(),
            normalize_path: false,
        }
    }

    pub fn with_config(mut self, config: DecorConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn config(&self) -> Option<&DecorConfig> {
        self.config.as_ref()
    }

    /// Resolve every controller instance from `container` instead of
    /// building it with `Default`.
    pub fn with_container(mut self, container: impl Container + 'static) -> Self {
        self.container = Some(Arc::new(container));
        self
    }

    /// Install the metadata of `C` and queue it for registration. `C` is
    /// built with `Default` unless a container is set.
    pub fn register<C: Controller + Default>(self) -> Self {
        self.queue::<C>(ControllerClass::of::<C>())
    }

    /// Like [`register`](Self::register), for controllers that only a
    /// container can provide.
    pub fn register_injected<C: Controller>(self) -> Self {
        self.queue::<C>(ControllerClass::injected::<C>())
    }

    fn queue<C: Controller>(mut self, class: ControllerClass) -> Self {
        if self.controllers.iter().any(|c| c.id() == class.id()) {
            warn!(controller = class.name(), "Controller registered twice, ignoring");
            return self;
        }
        self.registry.install::<C>();
        self.controllers.push(class);
        self
    }

    /// Direct access to the registry, for controllers described by hand.
    /// Types described here still need [`register_class`](Self::register_class).
    pub fn registry_mut(&mut self) -> &mut ControllerRegistry {
        &mut self.registry
    }

    pub fn registry(&self) -> &ControllerRegistry {
        &self.registry
    }

    /// Queue a controller whose metadata is already in the registry.
    pub fn register_class(mut self, class: ControllerClass) -> Self {
        if !self.controllers.iter().any(|c| c.id() == class.id()) {
            self.controllers.push(class);
        }
        self
    }

    /// Middleware applied to every request, in front of all controller
    /// middleware. The first one added runs first.
    pub fn middleware(mut self, middleware: impl Into<MiddlewareConfig>) -> Self {
        self.global_middleware.extend(middleware.into().into_handlers());
        self
    }

    /// Merge a plain Axum router next to the controllers.
    pub fn merge(mut self, router: Router) -> Self {
        self.routes.push(router);
        self
    }

    /// Apply a Tower layer to the entire application. Layers are applied
    /// during `build()`, in registration order.
    pub fn with_layer<L>(mut self, layer: L) -> Self
    where
        L: tower::Layer<Route> + Clone + Send + Sync + 'static,
        L::Service: tower::Service<HttpRequest<Body>> + Clone + Send + Sync + 'static,
        <L::Service as tower::Service<HttpRequest<Body>>>::Response: IntoResponse + 'static,
        <L::Service as tower::Service<HttpRequest<Body>>>::Error: Into<Infallible> + 'static,
        <L::Service as tower::Service<HttpRequest<Body>>>::Future: Send + 'static,
    {
        self.custom_layers.push(Box::new(move |router| router.layer(layer)));
        self
    }

    /// Apply an arbitrary transformation to the built router.
    pub fn with_layer_fn<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Router) -> Router + Send + 'static,
    {
        self.custom_layers.push(Box::new(f));
        self
    }

    pub fn with_trace(self) -> Self {
        self.with_layer(crate::layers::default_trace())
    }

    pub fn with_cors(self) -> Self {
        self.with_layer(crate::layers::default_cors())
    }

    pub fn with_catch_panic(self) -> Self {
        self.with_layer(crate::layers::catch_panic_layer())
    }

    /// Retry unmatched paths that end in `/` without the trailing slash.
    pub fn normalize_path(mut self) -> Self {
        self.normalize_path = true;
        self
    }

    /// Bind every queued controller and assemble the router.
    ///
    /// Fails with the first [`ResolveError`] raised while obtaining a
    /// controller instance.
    pub fn build(self) -> Result<Router, ResolveError> {
        let options = match &self.container {
            Some(container) => RegisterOptions::with_container(container.as_ref()),
            None => RegisterOptions::new(),
        };
        let mut app = register_controllers(&self.registry, &self.controllers, Router::new(), options)?;

        for r in self.routes {
            app = app.merge(r);
        }

        if self.normalize_path {
            let inner = app.clone();
            app = app.fallback(move |req: Request| {
                let inner = inner.clone();
                async move {
                    let path = req.uri().path();
                    if path.len() <= 1 || !path.ends_with('/') {
                        return StatusCode::NOT_FOUND.into_response();
                    }
                    let trimmed = path.trim_end_matches('/');
                    let new_uri = match req.uri().query() {
                        Some(q) => format!("{trimmed}?{q}"),
                        None => trimmed.to_string(),
                    };
                    let (mut parts, body) = req.into_parts();
                    parts.uri = new_uri.parse().unwrap_or(parts.uri);
                    match tower::ServiceExt::oneshot(inner, HttpRequest::from_parts(parts, body)).await {
                        Ok(resp) => resp,
                        Err(infallible) => match infallible {},
                    }
                }
            });
        }

        // Last layer added is outermost.
        for mw in self.global_middleware.into_iter().rev() {
            app = app.layer(from_fn(move |req: Request, next: Next| mw.call(req, next)));
        }

        for layer_fn in self.custom_layers {
            app = layer_fn(app);
        }

        Ok(app)
    }

    /// Build the application and serve it on `addr` until Ctrl-C or SIGTERM.
    pub async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.build()?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(%addr, "decor server listening");
        crate::http::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("decor server stopped");
        Ok(())
    }

    /// [`serve`](Self::serve) on `server.host:server.port` from the config,
    /// defaulting to `0.0.0.0:3000`.
    pub async fn serve_from_config(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.listen_addr();
        self.serve(&addr).await
    }

    fn listen_addr(&self) -> String {
        let (host, port) = match &self.config {
            Some(config) => (
                config.get_or("server.host", "0.0.0.0".to_string()),
                config.get_or("server.port", 3000u16),
            ),
            None => ("0.0.0.0".to_string(), 3000),
        };
        format!("{host}:{port}")
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
