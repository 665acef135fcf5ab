use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

use crate::codegen::controller_impl::generate_controller_impl;
use crate::routes_parsing;

pub fn expand(input: TokenStream) -> TokenStream {
    let item_impl = parse_macro_input!(input as syn::ItemImpl);
    match routes_parsing::parse(item_impl) {
        Ok(def) => {
            let item_impl = &def.item_impl;
            let controller_impl = generate_controller_impl(&def);
            quote! {
                #item_impl
                #controller_impl
            }
            .into()
        }
        Err(err) => err.to_compile_error().into(),
    }
}
