use crate::extract::*;
use crate::types::*;

/// Parsed representation of a `#[routes] impl Name { ... }` block.
pub struct RoutesImplDef {
    /// The impl block with route and middleware attributes stripped.
    pub item_impl: syn::ItemImpl,
    /// Methods carrying route or middleware attributes, in source order.
    pub route_methods: Vec<RouteMethod>,
}

/// Check that a route method is `fn name(&self)` or `fn name(&self, req)`.
fn check_signature(method: &syn::ImplItemFn) -> syn::Result<bool> {
    let sig = &method.sig;
    match sig.receiver() {
        Some(recv) if recv.reference.is_some() && recv.mutability.is_none() => {}
        Some(recv) => {
            return Err(syn::Error::new_spanned(
                recv,
                "route methods must take `&self`: the controller instance is shared across requests",
            ))
        }
        None => {
            return Err(syn::Error::new_spanned(
                &sig.ident,
                "route methods must take `&self`\n\
                 example: async fn list(&self) -> impl IntoResponse",
            ))
        }
    }

    let typed: Vec<_> = sig
        .inputs
        .iter()
        .filter(|arg| matches!(arg, syn::FnArg::Typed(_)))
        .collect();
    if typed.len() > 1 {
        return Err(syn::Error::new_spanned(
            typed[1],
            "route methods take at most one argument after `&self`: the request",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "route methods cannot be generic",
        ));
    }
    Ok(typed.len() == 1)
}

pub fn parse(mut item_impl: syn::ItemImpl) -> syn::Result<RoutesImplDef> {
    if let Some((_, path, _)) = &item_impl.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[routes] goes on an inherent impl block: `impl MyController { ... }`",
        ));
    }

    let mut route_methods = Vec::new();
    for item in item_impl.items.iter_mut() {
        let syn::ImplItem::Fn(method) = item else {
            continue;
        };
        let routes = extract_route_attrs(&method.attrs)?;
        let middleware = extract_middleware(&method.attrs)?;
        if routes.is_empty() && middleware.is_empty() {
            continue;
        }

        let takes_request = if routes.is_empty() {
            false
        } else {
            check_signature(method)?
        };
        method.attrs = strip_route_attrs(std::mem::take(&mut method.attrs));

        route_methods.push(RouteMethod {
            routes,
            middleware,
            takes_request,
            is_async: method.sig.asyncness.is_some(),
            fn_item: method.clone(),
        });
    }

    Ok(RoutesImplDef {
        item_impl,
        route_methods,
    })
}
