//! Handler closures bridging `(Arc<Self>, Request)` to controller methods.

use proc_macro2::TokenStream;
use quote::quote;

use crate::types::RouteMethod;

/// Closure passed to `ControllerRegistry::add_route` for `method`.
pub fn generate_handler_closure(
    krate: &TokenStream,
    self_ty: &syn::Type,
    method: &RouteMethod,
) -> TokenStream {
    let ident = method.ident();
    let call = match (method.takes_request, method.is_async) {
        (true, true) => quote! { __this.#ident(__req).await },
        (true, false) => quote! { __this.#ident(__req) },
        (false, true) => quote! { __this.#ident().await },
        (false, false) => quote! { __this.#ident() },
    };
    let req_binding = if method.takes_request {
        quote! { __req }
    } else {
        quote! { _ }
    };

    quote! {
        |__this: ::std::sync::Arc<#self_ty>, #req_binding: #krate::http::Request| async move {
            #call
        }
    }
}
