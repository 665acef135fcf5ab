pub mod builder;
pub mod config;
pub mod container;
pub mod controller;
pub mod error;
pub mod handler;
pub mod http;
pub mod layers;
pub mod meta;
pub mod middleware;
pub mod path;
pub mod prelude;
pub mod registrar;
pub mod registry;
pub mod types;

pub use builder::AppBuilder;
pub use config::{ConfigError, ConfigValue, DecorConfig, FromConfigValue};
pub use container::{ClassId, Container, ContainerExt, ResolveError, SimpleContainer};
pub use controller::{Controller, ControllerClass};
pub use error::{error_response, HttpError};
pub use handler::{BoundHandler, Instance, RouteHandler};
pub use layers::{catch_panic_layer, default_cors, default_trace, init_tracing};
pub use meta::{ControllerInfo, RouteInfo};
pub use middleware::{BoxResponseFuture, MiddlewareConfig, MiddlewareHandler};
pub use registrar::{register_controllers, RegisterOptions};
pub use registry::{ControllerBuilder, ControllerMetadata, ControllerRecord, ControllerRegistry, RouteDescriptor};
pub use types::{ApiResult, JsonResult, StatusResult};
