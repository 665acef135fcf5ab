use proc_macro2::TokenStream;
use quote::quote;

/// HTTP verbs accepted as route attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub const ATTRS: [(&'static str, HttpMethod); 7] = [
        ("get", HttpMethod::Get),
        ("post", HttpMethod::Post),
        ("put", HttpMethod::Put),
        ("delete", HttpMethod::Delete),
        ("patch", HttpMethod::Patch),
        ("head", HttpMethod::Head),
        ("options", HttpMethod::Options),
    ];

    pub fn from_attr(attr: &syn::Attribute) -> Option<Self> {
        Self::ATTRS
            .iter()
            .find(|(name, _)| attr.path().is_ident(name))
            .map(|(_, method)| *method)
    }

    /// `#krate::http::Method::GET` and friends.
    pub fn method_tokens(self, krate: &TokenStream) -> TokenStream {
        let verb = match self {
            HttpMethod::Get => quote!(GET),
            HttpMethod::Post => quote!(POST),
            HttpMethod::Put => quote!(PUT),
            HttpMethod::Delete => quote!(DELETE),
            HttpMethod::Patch => quote!(PATCH),
            HttpMethod::Head => quote!(HEAD),
            HttpMethod::Options => quote!(OPTIONS),
        };
        quote!(#krate::http::Method::#verb)
    }
}

/// The optional path argument of a route attribute: `#[get]`, `#[get()]`
/// or `#[get("/users/{id}")]`.
pub struct RoutePath {
    pub path: String,
}

impl RoutePath {
    pub fn from_attr(attr: &syn::Attribute) -> syn::Result<Self> {
        match &attr.meta {
            syn::Meta::Path(_) => Ok(RoutePath { path: String::new() }),
            syn::Meta::List(list) if list.tokens.is_empty() => Ok(RoutePath { path: String::new() }),
            syn::Meta::List(_) => attr.parse_args(),
            syn::Meta::NameValue(nv) => Err(syn::Error::new_spanned(
                nv,
                "expected a path literal: #[get(\"/users\")] or #[get]",
            )),
        }
    }
}

impl syn::parse::Parse for RoutePath {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let lit: syn::LitStr = input.parse()?;
        let _: Option<syn::Token![,]> = input.parse()?;
        Ok(RoutePath { path: lit.value() })
    }
}
