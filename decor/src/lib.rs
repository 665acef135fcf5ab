//! decor: declarative controllers over Axum.
//!
//! Annotate a struct and its methods, register the type, and every route is
//! bound onto an `axum::Router` with its controller and method middleware
//! in front of it:
//!
//! ```ignore
//! use decor::prelude::*;
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
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     AppBuilder::new()
//!         .register::<HelloController>()
//!         .serve("0.0.0.0:3000")
//!         .await
//! }
//! ```

// The proc macros use `proc-macro-crate` to detect whether the user depends
// on `decor` (facade) or `decor-core`, and generate the matching paths.
pub extern crate decor_core;
pub extern crate decor_macros;

pub use decor_core::*;
pub use decor_macros::{delete, get, head, middleware, options, patch, post, put, routes, Controller};

/// Import everything with `use decor::prelude::*`.
pub mod prelude {
    pub use decor_core::prelude::*;
}
