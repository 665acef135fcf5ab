use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use decor_core::container::{ClassId, Container, ResolveError, SimpleContainer};
use decor_core::controller::{Controller, ControllerClass};
use decor_core::handler::Instance;
use decor_core::middleware::MiddlewareHandler;
use decor_core::registrar::{register_controllers, RegisterOptions};
use decor_core::registry::ControllerRegistry;
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn send(router: axum::Router, method: Method, path: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).to_string())
}

type Log = Arc<Mutex<Vec<&'static str>>>;

fn recorder(log: &Log, label: &'static str) -> MiddlewareHandler {
    let log = log.clone();
    MiddlewareHandler::from_fn(move |req, next: decor_core::http::Next| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(label);
            next.run(req).await
        }
    })
    .named(label)
}

// ── Basic binding ──────────────────────────────────────────────────────────

#[derive(Default)]
struct HelloController;

impl Controller for HelloController {
    fn describe(registry: &mut ControllerRegistry) {
        registry
            .describe::<Self>("/hello")
            .get("/", "hello", |_this, _req| async { "Hello, World!" });
    }
}

#[tokio::test]
async fn hello_world_is_served() {
    let mut registry = ControllerRegistry::new();
    registry.install::<HelloController>();

    let router = register_controllers(
        &registry,
        &[ControllerClass::of::<HelloController>()],
        axum::Router::new(),
        RegisterOptions::new(),
    )
    .unwrap();

    let (status, body) = send(router, Method::GET, "/hello").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello, World!");
}

#[tokio::test]
async fn api_base_path_and_hello_route() {
    #[derive(Default)]
    struct Api;

    let mut registry = ControllerRegistry::new();
    registry
        .describe::<Api>("/api")
        .get("/hello", "hello", |_this, _req| async { "Hello, World!" });

    let router = register_controllers(
        &registry,
        &[ControllerClass::of::<Api>()],
        axum::Router::new(),
        RegisterOptions::new(),
    )
    .unwrap();

    let (status, body) = send(router, Method::GET, "/api/hello").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello, World!");
}

#[tokio::test]
async fn unregistered_path_is_404() {
    let mut registry = ControllerRegistry::new();
    registry.install::<HelloController>();
    let router = registry
        .register_controllers(
            &[ControllerClass::of::<HelloController>()],
            axum::Router::new(),
            RegisterOptions::new(),
        )
        .unwrap();

    let (status, _) = send(router.clone(), Method::GET, "/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(router, Method::POST, "/hello").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn empty_full_path_is_mounted_at_root() {
    #[derive(Default)]
    struct Root;

    let mut registry = ControllerRegistry::new();
    registry
        .describe::<Root>("/")
        .get("/", "index", |_this, _req| async { "root" });

    let router = register_controllers(
        &registry,
        &[ControllerClass::of::<Root>()],
        axum::Router::new(),
        RegisterOptions::new(),
    )
    .unwrap();

    let (status, body) = send(router, Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "root");
}

#[tokio::test]
async fn every_supported_verb_is_bound() {
    #[derive(Default)]
    struct Verbs;

    let mut registry = ControllerRegistry::new();
    registry
        .describe::<Verbs>("/v")
        .get("/", "get", |_this, _req| async { "get" })
        .post("/", "post", |_this, _req| async { "post" })
        .put("/", "put", |_this, _req| async { "put" })
        .patch("/", "patch", |_this, _req| async { "patch" })
        .delete("/", "delete", |_this, _req| async { "delete" })
        .options("/", "options", |_this, _req| async { "options" })
        .head("/head", "head", |_this, _req| async { StatusCode::NO_CONTENT });

    let router = register_controllers(
        &registry,
        &[ControllerClass::of::<Verbs>()],
        axum::Router::new(),
        RegisterOptions::new(),
    )
    .unwrap();

    for (method, expected) in [
        (Method::GET, "get"),
        (Method::POST, "post"),
        (Method::PUT, "put"),
        (Method::PATCH, "patch"),
        (Method::DELETE, "delete"),
        (Method::OPTIONS, "options"),
    ] {
        let (status, body) = send(router.clone(), method, "/v").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);
    }

    let (status, body) = send(router, Method::HEAD, "/v/head").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn unknown_verb_is_skipped() {
    #[derive(Default)]
    struct Odd;

    let mut registry = ControllerRegistry::new();
    registry
        .describe::<Odd>("/odd")
        .route(Method::TRACE, "/trace", "trace", |_this, _req| async { "trace" })
        .get("/ok", "ok", |_this, _req| async { "ok" });

    let router = register_controllers(
        &registry,
        &[ControllerClass::of::<Odd>()],
        axum::Router::new(),
        RegisterOptions::new(),
    )
    .unwrap();

    let (status, _) = send(router.clone(), Method::TRACE, "/odd/trace").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = send(router, Method::GET, "/odd/ok").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn existing_routes_are_kept() {
    let mut registry = ControllerRegistry::new();
    registry.install::<HelloController>();

    let router = axum::Router::new().route("/health", axum::routing::get(|| async { "OK" }));
    let router = register_controllers(
        &registry,
        &[ControllerClass::of::<HelloController>()],
        router,
        RegisterOptions::new(),
    )
    .unwrap();

    let (_, body) = send(router.clone(), Method::GET, "/health").await;
    assert_eq!(body, "OK");
    let (_, body) = send(router, Method::GET, "/hello").await;
    assert_eq!(body, "Hello, World!");
}

// ── Middleware ordering ────────────────────────────────────────────────────

struct Traced {
    log: Log,
}

#[tokio::test]
async fn class_middleware_runs_before_route_middleware() {
    let log: Log = Arc::default();

    let mut registry = ControllerRegistry::new();
    registry
        .describe::<Traced>("/traced")
        .middleware(recorder(&log, "controller"))
        .method_middleware("handle", recorder(&log, "route"))
        .get("/", "handle", |this: Arc<Traced>, _req| async move {
            this.log.lock().unwrap().push("handler");
            "done"
        });

    let container = SimpleContainer::new().provide(Traced { log: log.clone() });
    let router = register_controllers(
        &registry,
        &[ControllerClass::injected::<Traced>()],
        axum::Router::new(),
        RegisterOptions::with_container(&container),
    )
    .unwrap();

    let (status, body) = send(router, Method::GET, "/traced").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "done");
    assert_eq!(*log.lock().unwrap(), ["controller", "route", "handler"]);
}

#[tokio::test]
async fn method_middleware_only_applies_to_its_method() {
    let log: Log = Arc::default();

    let mut registry = ControllerRegistry::new();
    registry
        .describe::<Traced>("/traced")
        .method_middleware("guarded", recorder(&log, "guard"))
        .get("/guarded", "guarded", |_this, _req| async { "g" })
        .get("/open", "open", |_this, _req| async { "o" });

    let container = SimpleContainer::new().provide(Traced { log: log.clone() });
    let router = register_controllers(
        &registry,
        &[ControllerClass::injected::<Traced>()],
        axum::Router::new(),
        RegisterOptions::with_container(&container),
    )
    .unwrap();

    send(router.clone(), Method::GET, "/traced/open").await;
    assert!(log.lock().unwrap().is_empty());
    send(router, Method::GET, "/traced/guarded").await;
    assert_eq!(*log.lock().unwrap(), ["guard"]);
}

#[tokio::test]
async fn middleware_can_short_circuit() {
    #[derive(Default)]
    struct Locked;

    let deny = MiddlewareHandler::from_fn(|_req, _next: decor_core::http::Next| async {
        use axum::response::IntoResponse;
        StatusCode::UNAUTHORIZED.into_response()
    });

    let mut registry = ControllerRegistry::new();
    registry
        .describe::<Locked>("/locked")
        .middleware(deny)
        .get("/", "secret", |_this, _req| async { "secret" });

    let router = register_controllers(
        &registry,
        &[ControllerClass::of::<Locked>()],
        axum::Router::new(),
        RegisterOptions::new(),
    )
    .unwrap();

    let (status, body) = send(router, Method::GET, "/locked").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_empty());
}

// ── Containers ─────────────────────────────────────────────────────────────

struct Greeter {
    greeting: String,
}

fn greeter_registry() -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    registry
        .describe::<Greeter>("/greet")
        .get("/", "greet", |this: Arc<Greeter>, _req| async move {
            this.greeting.clone()
        });
    registry
}

#[tokio::test]
async fn instance_comes_from_container() {
    let container = SimpleContainer::new().provide(Greeter {
        greeting: "Bonjour".into(),
    });
    let router = register_controllers(
        &greeter_registry(),
        &[ControllerClass::injected::<Greeter>()],
        axum::Router::new(),
        RegisterOptions::with_container(&container),
    )
    .unwrap();

    let (_, body) = send(router, Method::GET, "/greet").await;
    assert_eq!(body, "Bonjour");
}

#[test]
fn missing_provider_is_propagated() {
    let container = SimpleContainer::new();
    let err = register_controllers(
        &greeter_registry(),
        &[ControllerClass::injected::<Greeter>()],
        axum::Router::<()>::new(),
        RegisterOptions::with_container(&container),
    )
    .unwrap_err();

    assert!(matches!(err, ResolveError::NoProvider { .. }));
    assert!(err.to_string().starts_with("No provider for"));
}

#[test]
fn injected_controller_without_container_fails() {
    let err = register_controllers(
        &greeter_registry(),
        &[ControllerClass::injected::<Greeter>()],
        axum::Router::<()>::new(),
        RegisterOptions::new(),
    )
    .unwrap_err();
    assert!(matches!(err, ResolveError::NoProvider { .. }));
}

/// Answers every request with an instance of the wrong type.
struct Confused;

impl Container for Confused {
    fn get(&self, _id: &ClassId) -> Result<Instance, ResolveError> {
        Ok(Arc::new(42u32))
    }
}

#[test]
fn wrong_instance_type_is_a_type_mismatch() {
    let err = register_controllers(
        &greeter_registry(),
        &[ControllerClass::injected::<Greeter>()],
        axum::Router::<()>::new(),
        RegisterOptions::with_container(&Confused),
    )
    .unwrap_err();
    assert!(matches!(err, ResolveError::TypeMismatch { .. }));
}

#[test]
fn container_error_passes_through_unchanged() {
    struct Failing;

    impl Container for Failing {
        fn get(&self, _id: &ClassId) -> Result<Instance, ResolveError> {
            Err(ResolveError::Other("database unavailable".into()))
        }
    }

    let err = register_controllers(
        &greeter_registry(),
        &[ControllerClass::injected::<Greeter>()],
        axum::Router::<()>::new(),
        RegisterOptions::with_container(&Failing),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "database unavailable");
}

#[tokio::test]
async fn controller_without_routes_adds_nothing() {
    #[derive(Default)]
    struct Empty;

    let registry = ControllerRegistry::new();
    let router = register_controllers(
        &registry,
        &[ControllerClass::of::<Empty>()],
        axum::Router::new(),
        RegisterOptions::new(),
    )
    .unwrap();

    let (status, _) = send(router, Method::GET, "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn request_reaches_the_handler() {
    #[derive(Default)]
    struct Echo;

    let mut registry = ControllerRegistry::new();
    registry
        .describe::<Echo>("/echo")
        .post("/", "echo", |_this, req: decor_core::http::Request| async move {
            let bytes = req.into_body().collect().await.unwrap().to_bytes();
            String::from_utf8_lossy(&bytes).to_uppercase()
        });

    let router = register_controllers(
        &registry,
        &[ControllerClass::of::<Echo>()],
        axum::Router::new(),
        RegisterOptions::new(),
    )
    .unwrap();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/echo")
        .body(Body::from("ping"))
        .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"PING");
}

// ── Paths the router cannot take as-is ─────────────────────────────────────

#[tokio::test]
async fn duplicate_route_keeps_the_first_controller() {
    #[derive(Default)]
    struct First;
    #[derive(Default)]
    struct Second;

    let mut registry = ControllerRegistry::new();
    registry
        .describe::<First>("/api")
        .get("/hello", "hello", |_this, _req| async { "first" });
    registry
        .describe::<Second>("/api")
        .get("/hello", "hello", |_this, _req| async { "second" })
        .post("/hello", "create", |_this, _req| async { "second-post" });

    let router = register_controllers(
        &registry,
        &[ControllerClass::of::<First>(), ControllerClass::of::<Second>()],
        axum::Router::new(),
        RegisterOptions::new(),
    )
    .unwrap();

    let (status, body) = send(router.clone(), Method::GET, "/api/hello").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "first");
    let (_, body) = send(router, Method::POST, "/api/hello").await;
    assert_eq!(body, "second-post");
}

#[tokio::test]
async fn duplicate_route_within_one_controller_is_skipped() {
    #[derive(Default)]
    struct Twice;

    let mut registry = ControllerRegistry::new();
    registry
        .describe::<Twice>("/twice")
        .get("/", "a", |_this, _req| async { "a" })
        .get("", "b", |_this, _req| async { "b" });

    let router = register_controllers(
        &registry,
        &[ControllerClass::of::<Twice>()],
        axum::Router::new(),
        RegisterOptions::new(),
    )
    .unwrap();

    let (_, body) = send(router, Method::GET, "/twice").await;
    assert_eq!(body, "a");
}

#[tokio::test]
async fn colon_params_are_bound_as_captures() {
    #[derive(Default)]
    struct Users;

    let mut registry = ControllerRegistry::new();
    registry
        .describe::<Users>("/users")
        .get("/:id", "get_user", |_this, req: decor_core::http::Request| async move {
            let (mut parts, _) = req.into_parts();
            let axum::extract::Path(id) =
                <axum::extract::Path<u32> as axum::extract::FromRequestParts<()>>::from_request_parts(
                    &mut parts,
                    &(),
                )
                .await
                .unwrap();
            format!("user {id}")
        });

    let router = register_controllers(
        &registry,
        &[ControllerClass::of::<Users>()],
        axum::Router::new(),
        RegisterOptions::new(),
    )
    .unwrap();

    let (status, body) = send(router, Method::GET, "/users/7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "user 7");
}

#[tokio::test]
async fn unsupported_path_segment_is_skipped() {
    #[derive(Default)]
    struct Files;

    let mut registry = ControllerRegistry::new();
    registry
        .describe::<Files>("/files")
        .get("/:name?", "optional", |_this, _req| async { "optional" })
        .get("/*", "any", |_this, _req| async { "any" })
        .get("/list", "list", |_this, _req| async { "list" });

    let router = register_controllers(
        &registry,
        &[ControllerClass::of::<Files>()],
        axum::Router::new(),
        RegisterOptions::new(),
    )
    .unwrap();

    let (status, body) = send(router, Method::GET, "/files/list").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "list");
}

#[tokio::test]
async fn differently_named_capture_on_the_same_path_is_skipped() {
    #[derive(Default)]
    struct ById;
    #[derive(Default)]
    struct ByName;

    let mut registry = ControllerRegistry::new();
    registry
        .describe::<ById>("/items")
        .get("/{id}", "get", |_this, _req| async { "by id" });
    registry
        .describe::<ByName>("/items")
        .delete("/{name}", "remove", |_this, _req| async { "by name" });

    let router = register_controllers(
        &registry,
        &[ControllerClass::of::<ById>(), ControllerClass::of::<ByName>()],
        axum::Router::new(),
        RegisterOptions::new(),
    )
    .unwrap();

    let (_, body) = send(router.clone(), Method::GET, "/items/3").await;
    assert_eq!(body, "by id");
    let (status, _) = send(router, Method::DELETE, "/items/3").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
