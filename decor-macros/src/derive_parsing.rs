use syn::punctuated::Punctuated;

/// Parsed representation of a `#[derive(Controller)]` struct.
pub struct ControllerStructDef {
    pub name: syn::Ident,
    pub generics: syn::Generics,
    /// `#[controller(path = "...")]`; `None` mounts routes at the root.
    pub prefix: Option<String>,
    /// `#[controller(middleware(..))]` expressions, in declaration order.
    pub middleware: Vec<syn::Expr>,
}

pub fn parse(input: syn::DeriveInput) -> syn::Result<ControllerStructDef> {
    let name = input.ident;

    if !matches!(input.data, syn::Data::Struct(_)) {
        return Err(syn::Error::new(
            name.span(),
            "#[derive(Controller)] only works on structs - enums and unions are not supported",
        ));
    }

    // Parse #[controller(path = "...", middleware(a(), b()))]
    let mut prefix: Option<String> = None;
    let mut middleware: Vec<syn::Expr> = Vec::new();
    for attr in &input.attrs {
        if attr.path().is_ident("controller") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("path") {
                    let value = meta.value()?;
                    let lit: syn::LitStr = value.parse()?;
                    prefix = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("middleware") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let list: Punctuated<syn::Expr, syn::Token![,]> =
                        Punctuated::parse_terminated(&content)?;
                    middleware.extend(list);
                    Ok(())
                } else {
                    Err(meta.error(
                        "unknown attribute in #[controller(...)]: expected `path` or `middleware`",
                    ))
                }
            })?;
        }
    }

    Ok(ControllerStructDef {
        name,
        generics: input.generics,
        prefix,
        middleware,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn path_and_middleware() {
        let input: syn::DeriveInput = parse_quote! {
            #[controller(path = "/users", middleware(request_log(), auth()))]
            struct UserController {
                users: Vec<String>,
            }
        };
        let def = parse(input).unwrap();
        assert_eq!(def.name, "UserController");
        assert_eq!(def.prefix.as_deref(), Some("/users"));
        assert_eq!(def.middleware.len(), 2);
    }

    #[test]
    fn path_is_optional() {
        let input: syn::DeriveInput = parse_quote! {
            struct Root;
        };
        assert!(parse(input).unwrap().prefix.is_none());
    }

    #[test]
    fn unknown_controller_key_is_an_error() {
        let input: syn::DeriveInput = parse_quote! {
            #[controller(state = AppState)]
            struct Old;
        };
        assert!(parse(input).is_err());
    }

    #[test]
    fn enums_are_rejected() {
        let input: syn::DeriveInput = parse_quote! {
            enum NotAController { A }
        };
        assert!(parse(input).is_err());
    }
}
