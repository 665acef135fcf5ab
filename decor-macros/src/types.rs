use crate::route::HttpMethod;

/// One route attribute on a controller method.
pub struct RouteDecl {
    pub method: HttpMethod,
    pub path: String,
}

/// A method of a `#[routes]` impl block that carries route or middleware
/// attributes.
pub struct RouteMethod {
    pub routes: Vec<RouteDecl>,
    /// `#[middleware(..)]` expressions, in declaration order.
    pub middleware: Vec<syn::Expr>,
    /// Whether the method takes the request after `&self`.
    pub takes_request: bool,
    pub is_async: bool,
    /// The method with its route and middleware attributes stripped.
    pub fn_item: syn::ImplItemFn,
}

impl RouteMethod {
    pub fn ident(&self) -> &syn::Ident {
        &self.fn_item.sig.ident
    }
}
