//! Everything a controller module needs, in one `use`.
//!
//! ```ignore
//! use decor_core::prelude::*;
//!
//! #[derive(Controller, Default)]
//! #[controller(path = "/hello")]
//! pub struct HelloController;
//!
//! #[routes]
//! impl HelloController {
//!     #[get]
//!     async fn hello(&self) -> &'static str {
//!         "Hello, World!"
//!     }
//! }
//! ```

// Derive macro and route attributes. `Controller` names both the derive and
// the trait below.
pub use decor_macros::{delete, get, head, middleware, options, patch, post, put, routes, Controller};

pub use crate::builder::AppBuilder;
pub use crate::config::{ConfigError, ConfigValue, DecorConfig, FromConfigValue};
pub use crate::container::{ClassId, Container, ContainerExt, ResolveError, SimpleContainer};
pub use crate::controller::{Controller, ControllerClass};
pub use crate::error::HttpError;
pub use crate::middleware::{MiddlewareConfig, MiddlewareHandler};
pub use crate::registrar::{register_controllers, RegisterOptions};
pub use crate::registry::ControllerRegistry;
pub use crate::types::{ApiResult, JsonResult, StatusResult};

pub use crate::http::body::Bytes;
pub use crate::http::extract::{FromRequest, FromRequestParts, Path, Query, Request, State};
pub use crate::http::middleware::{from_fn, Next};
pub use crate::http::response::{Html, IntoResponse, Redirect, Response};
pub use crate::http::{Body, HeaderMap, HeaderName, HeaderValue, Json, Method, Router, StatusCode, Uri};
