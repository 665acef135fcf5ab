//! Crate path resolution for generated code.
//!
//! Detects whether the user depends on `decor` (facade) or `decor-core`
//! directly, and returns the appropriate path prefix for generated code.

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;

/// Returns the token stream for accessing `decor_core` items.
///
/// `::decor` when the facade is a dependency, `::decor_core` otherwise.
pub fn decor_core_path() -> TokenStream {
    let found = crate_name("decor").or_else(|_| crate_name("decor-core"));
    match found {
        Ok(FoundCrate::Itself) => quote!(crate),
        Ok(FoundCrate::Name(name)) => {
            let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
            quote!(::#ident)
        }
        // Fallback so the error points at a missing crate, not at the macro.
        Err(_) => quote!(::decor_core),
    }
}
