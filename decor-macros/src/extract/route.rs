//! Route-related attribute extraction.

use syn::punctuated::Punctuated;

use crate::route::{HttpMethod, RoutePath};
use crate::types::RouteDecl;

pub fn is_route_attr(attr: &syn::Attribute) -> bool {
    HttpMethod::from_attr(attr).is_some()
}

pub fn is_middleware_attr(attr: &syn::Attribute) -> bool {
    attr.path().is_ident("middleware")
}

pub fn strip_route_attrs(attrs: Vec<syn::Attribute>) -> Vec<syn::Attribute> {
    attrs
        .into_iter()
        .filter(|a| !is_route_attr(a) && !is_middleware_attr(a))
        .collect()
}

/// Every route attribute on a method, in source order.
pub fn extract_route_attrs(attrs: &[syn::Attribute]) -> syn::Result<Vec<RouteDecl>> {
    let mut routes = Vec::new();
    for attr in attrs {
        if let Some(method) = HttpMethod::from_attr(attr) {
            let route_path = RoutePath::from_attr(attr)?;
            routes.push(RouteDecl {
                method,
                path: route_path.path,
            });
        }
    }
    Ok(routes)
}

/// Expressions from every `#[middleware(a, b)]` attribute, flattened in
/// source order.
pub fn extract_middleware(attrs: &[syn::Attribute]) -> syn::Result<Vec<syn::Expr>> {
    let mut exprs = Vec::new();
    for attr in attrs.iter().filter(|a| is_middleware_attr(a)) {
        let list: Punctuated<syn::Expr, syn::Token![,]> =
            attr.parse_args_with(Punctuated::parse_terminated)?;
        if list.is_empty() {
            return Err(syn::Error::new_spanned(
                attr,
                "#[middleware(..)] needs at least one middleware expression",
            ));
        }
        exprs.extend(list);
    }
    Ok(exprs)
}
