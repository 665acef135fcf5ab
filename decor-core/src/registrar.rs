//! Binding of registered controllers onto an Axum router.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::container::{Container, ResolveError};
use crate::controller::ControllerClass;
use crate::handler::{BoundHandler, Instance};
use crate::http::middleware::from_fn;
use crate::http::routing::{self, MethodRouter};
use crate::http::{Method, Next, Request, Router};
use crate::middleware::MiddlewareHandler;
use crate::path::{join, pattern_shape, to_route_pattern};
use crate::registry::{ControllerRegistry, RouteDescriptor};

/// Options for [`register_controllers`].
#[derive(Clone, Copy, Default)]
pub struct RegisterOptions<'a> {
    /// Source of controller instances. When absent, controllers are built
    /// with their default constructor.
    pub container: Option<&'a dyn Container>,
}

impl<'a> RegisterOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(container: &'a dyn Container) -> Self {
        Self {
            container: Some(container),
        }
    }
}

/// Bind every route of `controllers`, in order, onto `router`.
///
/// For each controller:
///
/// 1. an instance is obtained from the container, or built with `Default`;
/// 2. each route is composed as `base_path + route.path` with the chain
///    `[class middleware.., route middleware.., handler]`, class middleware
///    outermost;
/// 3. the route is added with the Axum primitive for its verb.
///
/// All routes of a controller are prepared before any of them touches the
/// router, so a failing controller contributes nothing. Errors from the
/// container are returned as-is.
///
/// Routes whose composed path is empty are mounted at `/`. `:name`
/// segments are bound as `{name}` captures. The following are skipped with
/// a warning instead of reaching the router:
///
/// - a verb outside GET/POST/PUT/DELETE/PATCH/HEAD/OPTIONS;
/// - a path segment the router cannot express (`:id?`, `*`);
/// - a verb and path already bound earlier in the same call (first wins);
/// - a path whose captures are named differently from an earlier route
///   matching the same requests.
pub fn register_controllers<S>(
    registry: &ControllerRegistry,
    controllers: &[ControllerClass],
    mut router: Router<S>,
    options: RegisterOptions<'_>,
) -> Result<Router<S>, ResolveError>
where
    S: Clone + Send + Sync + 'static,
{
    let mut bound = BoundRoutes::default();
    for class in controllers {
        let instance = class.instantiate(options.container)?;
        let routes = bind_controller::<S>(registry, class, instance)?;
        let mut count = 0;
        for route in routes {
            if let Err(reason) = bound.claim(&route.verb, &route.path) {
                warn!(
                    method = %route.verb,
                    path = %route.path,
                    controller = class.name(),
                    handler = %route.handler_name,
                    reason,
                    "Route skipped"
                );
                continue;
            }
            router = router.route(&route.path, route.method_router);
            count += 1;
        }
        info!(controller = class.name(), routes = count, "Controller registered");
    }
    Ok(router)
}

struct BoundRoute<S> {
    verb: Method,
    path: String,
    handler_name: String,
    method_router: MethodRouter<S>,
}

/// Verbs and paths handed to the router during one registration pass.
#[derive(Default)]
struct BoundRoutes {
    taken: HashSet<(Method, String)>,
    /// Shape of each bound pattern to the first pattern bound with it.
    patterns: HashMap<String, String>,
}

impl BoundRoutes {
    fn claim(&mut self, verb: &Method, path: &str) -> Result<(), &'static str> {
        let shape = pattern_shape(path);
        if let Some(first) = self.patterns.get(&shape) {
            if first != path {
                return Err("Path conflicts with the captures of an earlier route");
            }
        }
        if !self.taken.insert((verb.clone(), path.to_string())) {
            return Err("Duplicate route");
        }
        self.patterns.entry(shape).or_insert_with(|| path.to_string());
        Ok(())
    }
}

impl ControllerRegistry {
    /// Shorthand for [`register_controllers`] on this registry.
    pub fn register_controllers<S>(
        &self,
        controllers: &[ControllerClass],
        router: Router<S>,
        options: RegisterOptions<'_>,
    ) -> Result<Router<S>, ResolveError>
    where
        S: Clone + Send + Sync + 'static,
    {
        register_controllers(self, controllers, router, options)
    }
}

fn bind_controller<S>(
    registry: &ControllerRegistry,
    class: &ControllerClass,
    instance: Instance,
) -> Result<Vec<BoundRoute<S>>, ResolveError>
where
    S: Clone + Send + Sync + 'static,
{
    let type_id = class.id().type_id();
    let (base_path, routes) = match registry.record_of(type_id) {
        Some(record) => (record.base_path(), record.routes()),
        None => ("", &[][..]),
    };
    let class_middleware = registry.class_middleware_of(type_id);

    let mut bound = Vec::with_capacity(routes.len());
    for route in routes {
        let handler = route
            .handler
            .bind(instance.clone())
            .ok_or_else(|| ResolveError::TypeMismatch {
                expected: class.name().to_string(),
            })?;

        let Some(method_router) = endpoint::<S>(&route.verb, handler) else {
            warn!(
                method = %route.verb,
                path = %route.path,
                controller = class.name(),
                handler = %route.handler_name,
                "Unsupported HTTP method, route skipped"
            );
            continue;
        };

        let mut full_path = join(base_path, &route.path);
        if full_path.is_empty() {
            full_path.push('/');
        }
        let Some(full_path) = to_route_pattern(&full_path) else {
            warn!(
                method = %route.verb,
                path = %full_path,
                controller = class.name(),
                handler = %route.handler_name,
                "Unsupported path segment, route skipped"
            );
            continue;
        };
        let method_router = wrap(method_router, class_middleware, route);
        debug!(
            method = %route.verb,
            path = %full_path,
            controller = class.name(),
            handler = %route.handler_name,
            middleware = class_middleware.len() + route.middleware.len(),
            "Bound route"
        );
        bound.push(BoundRoute {
            verb: route.verb.clone(),
            path: full_path,
            handler_name: route.handler_name.clone(),
            method_router,
        });
    }
    Ok(bound)
}

/// Route `handler` under the Axum primitive matching `verb`.
fn endpoint<S>(verb: &Method, handler: BoundHandler) -> Option<MethodRouter<S>>
where
    S: Clone + Send + Sync + 'static,
{
    let call = move |req: Request| handler(req);
    let method_router = match *verb {
        Method::GET => routing::get(call),
        Method::POST => routing::post(call),
        Method::PUT => routing::put(call),
        Method::DELETE => routing::delete(call),
        Method::PATCH => routing::patch(call),
        Method::HEAD => routing::head(call),
        Method::OPTIONS => routing::options(call),
        _ => return None,
    };
    Some(method_router)
}

/// Layer the middleware chain over a route. The last layer added is the
/// outermost, so the chain is applied back to front.
fn wrap<S>(
    mut method_router: MethodRouter<S>,
    class_middleware: &[MiddlewareHandler],
    route: &RouteDescriptor,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    for mw in class_middleware.iter().chain(route.middleware.iter()).rev() {
        let mw = mw.clone();
        method_router = method_router.layer(from_fn(move |req: Request, next: Next| mw.call(req, next)));
    }
    method_router
}
