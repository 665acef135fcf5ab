//! Controller trait implementation generation.

use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::handlers::generate_handler_closure;
use crate::crate_path::decor_core_path;
use crate::routes_parsing::RoutesImplDef;

/// Generate `impl Controller for Name`.
///
/// `describe` replays the declarations in source order: class metadata
/// first, then for each method its middleware followed by its routes, so
/// every route sees the middleware declared on its method.
pub fn generate_controller_impl(def: &RoutesImplDef) -> TokenStream {
    let krate = decor_core_path();
    let self_ty = &def.item_impl.self_ty;
    let (impl_generics, _, where_clause) = def.item_impl.generics.split_for_impl();

    let registrations = def.route_methods.iter().map(|method| {
        let name = method.ident().to_string();
        let middleware = method.middleware.iter().map(|expr| {
            quote! {
                __registry.add_method_middleware::<Self>(#name, #expr);
            }
        });
        let routes = method.routes.iter().map(|route| {
            let verb = route.method.method_tokens(&krate);
            let path = &route.path;
            let handler = generate_handler_closure(&krate, self_ty, method);
            quote! {
                __registry.add_route::<Self, _, _, _>(#verb, #path, #name, #handler);
            }
        });
        quote! {
            #(#middleware)*
            #(#routes)*
        }
    });

    quote! {
        impl #impl_generics #krate::controller::Controller for #self_ty #where_clause {
            fn describe(__registry: &mut #krate::registry::ControllerRegistry) {
                <#self_ty>::__decor_describe_class(__registry);
                #(#registrations)*
            }
        }
    }
}
