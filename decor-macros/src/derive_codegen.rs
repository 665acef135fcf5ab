use proc_macro2::TokenStream;
use quote::quote;

use crate::crate_path::decor_core_path;
use crate::derive_parsing::ControllerStructDef;

/// Generate the hidden class-level describe function that `#[routes]`
/// calls first: base path, then class middleware.
pub fn generate(def: &ControllerStructDef) -> TokenStream {
    let krate = decor_core_path();
    let name = &def.name;
    let (impl_generics, ty_generics, where_clause) = def.generics.split_for_impl();

    let prefix = def.prefix.as_deref().unwrap_or("");
    let middleware = def.middleware.iter().map(|expr| {
        quote! {
            __registry.add_class_middleware::<Self>(#expr);
        }
    });

    quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            #[doc(hidden)]
            pub fn __decor_describe_class(__registry: &mut #krate::registry::ControllerRegistry) {
                __registry.set_base_path::<Self>(#prefix);
                #(#middleware)*
            }
        }
    }
}
