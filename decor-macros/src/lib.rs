extern crate proc_macro;
use proc_macro::TokenStream;

pub(crate) mod codegen;
pub(crate) mod crate_path;
pub(crate) mod derive_codegen;
pub(crate) mod derive_controller;
pub(crate) mod derive_parsing;
pub(crate) mod extract;
pub(crate) mod route;
pub(crate) mod routes_attr;
pub(crate) mod routes_parsing;
pub(crate) mod types;

/// Derive macro for declaring a decor controller struct.
///
/// # Struct-level attribute
///
/// `#[controller(...)]` configures the controller:
///
/// | Parameter    | Required | Description |
/// |--------------|----------|-------------|
/// | `path`       | no       | Base path prefixed to every route of this controller |
/// | `middleware` | no       | Middleware run in front of every route, first listed outermost |
///
/// # Example
///
/// ```ignore
/// use decor::prelude::*;
///
/// #[derive(Controller, Default)]
/// #[controller(path = "/users", middleware(request_log()))]
/// pub struct UserController {
///     users: UserStore,
/// }
///
/// #[routes]
/// impl UserController {
///     #[get]
///     async fn list(&self) -> Json<Vec<User>> {
///         Json(self.users.all())
///     }
/// }
/// ```
///
/// The derive only records the base path and class middleware; the
/// [`Controller`](../decor_core/controller/trait.Controller.html) impl
/// comes from [`routes`].
#[proc_macro_derive(Controller, attributes(controller))]
pub fn derive_controller(input: TokenStream) -> TokenStream {
    derive_controller::expand(input)
}

/// Attribute macro on an `impl` block. Generates the `Controller` impl that
/// describes every annotated method to a `ControllerRegistry`.
///
/// Must be placed on an inherent `impl` block whose `Self` type derives
/// [`Controller`].
///
/// Route methods take `&self` and optionally the request, may be `async`,
/// and return anything that implements `IntoResponse`:
///
/// ```ignore
/// #[routes]
/// impl UserController {
///     #[get("/{id}")]
///     #[middleware(require_token())]
///     async fn get_by_id(&self, req: Request) -> ApiResult<Json<User>> { ... }
///
///     #[post]
///     #[put("/")]
///     async fn save(&self, req: Request) -> StatusCode { ... }
/// }
/// ```
#[proc_macro_attribute]
pub fn routes(_args: TokenStream, input: TokenStream) -> TokenStream {
    routes_attr::expand(input)
}

// ---------------------------------------------------------------------------
// No-op attributes, consumed by #[routes] from the token stream. Declared
// here so they resolve outside #[routes] and show up in docs.
// ---------------------------------------------------------------------------

/// Register a **GET** route handler.
///
/// The path is optional and relative to the controller's base path:
///
/// ```ignore
/// #[get]                  // the base path itself
/// #[get("/{id}")]         // path parameter (Axum syntax)
/// #[get("/{id}/posts")]   // nested
/// ```
///
/// This attribute is consumed by [`routes`]; it is a no-op on its own.
#[proc_macro_attribute]
pub fn get(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Register a **POST** route handler.
///
/// ```ignore
/// #[post]
/// async fn create(&self, req: Request) -> (StatusCode, Json<User>) { ... }
/// ```
///
/// This attribute is consumed by [`routes`]; it is a no-op on its own.
#[proc_macro_attribute]
pub fn post(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Register a **PUT** route handler.
///
/// This attribute is consumed by [`routes`]; it is a no-op on its own.
#[proc_macro_attribute]
pub fn put(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Register a **DELETE** route handler.
///
/// ```ignore
/// #[delete("/{id}")]
/// async fn remove(&self, req: Request) -> StatusResult { ... }
/// ```
///
/// This attribute is consumed by [`routes`]; it is a no-op on its own.
#[proc_macro_attribute]
pub fn delete(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Register a **PATCH** route handler.
///
/// This attribute is consumed by [`routes`]; it is a no-op on its own.
#[proc_macro_attribute]
pub fn patch(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Register a **HEAD** route handler.
///
/// This attribute is consumed by [`routes`]; it is a no-op on its own.
#[proc_macro_attribute]
pub fn head(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Register an **OPTIONS** route handler.
///
/// This attribute is consumed by [`routes`]; it is a no-op on its own.
#[proc_macro_attribute]
pub fn options(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Attach middleware to one controller method.
///
/// Accepts one or more expressions convertible into a `MiddlewareConfig`
/// (a `MiddlewareHandler`, a `Vec` or an array of them). They run after the
/// controller's own middleware, in the order written:
///
/// ```ignore
/// #[get("/admin")]
/// #[middleware(require_token(), audit())]
/// async fn admin(&self) -> &'static str { "ok" }
/// ```
///
/// Several `#[middleware]` attributes on one method append. A method with
/// middleware but no route attribute only records the middleware.
///
/// This attribute is consumed by [`routes`]; it is a no-op on its own.
#[proc_macro_attribute]
pub fn middleware(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}
