//! Path normalization shared by the controller and route registrations.

/// Normalize a controller or route path segment.
///
/// - an empty path stays empty (no `/` is forced),
/// - a missing leading `/` is prepended,
/// - a single trailing `/` is stripped.
///
/// `"/"` therefore normalizes to `""`: a route declared at `"/"` under a
/// controller at `"/users"` lives at `"/users"`, not `"/users/"`.
///
/// ```
/// use decor_core::path::normalize;
///
/// assert_eq!(normalize("users/"), "/users");
/// assert_eq!(normalize("/"), "");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    if normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Compose a controller base path with a route path.
///
/// Plain concatenation: both sides are expected to be normalized already,
/// so no separator is inserted.
pub fn join(base: &str, route: &str) -> String {
    let mut full = String::with_capacity(base.len() + route.len());
    full.push_str(base);
    full.push_str(route);
    full
}

/// Rewrite a composed path into the capture syntax of the Axum router.
///
/// `:name` segments become `{name}`. Returns `None` when a segment is one
/// the router rejects: a `:` or `*` segment that is not a plain name, or
/// an unbalanced brace.
///
/// ```
/// use decor_core::path::to_route_pattern;
///
/// assert_eq!(to_route_pattern("/users/:id").as_deref(), Some("/users/{id}"));
/// assert_eq!(to_route_pattern("/users/{id}").as_deref(), Some("/users/{id}"));
/// assert_eq!(to_route_pattern("/users/:id?"), None);
/// ```
pub fn to_route_pattern(path: &str) -> Option<String> {
    let segments = path
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) if is_param_name(name) => Some(format!("{{{name}}}")),
            Some(_) => None,
            None if segment.starts_with('*') => None,
            None if segment.matches('{').count() != segment.matches('}').count() => None,
            None => Some(segment.to_string()),
        })
        .collect::<Option<Vec<_>>>()?;
    Some(segments.join("/"))
}

fn is_param_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// The matching shape of a route pattern: every capture is replaced by
/// `{}` (or `{*}` for a wildcard), so `/users/{id}` and `/users/{name}`
/// share a shape.
pub fn pattern_shape(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|segment| {
            if segment.starts_with("{*") {
                "{*}"
            } else if segment.starts_with('{') && segment.ends_with('}') {
                "{}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn prepends_leading_slash() {
        assert_eq!(normalize("users"), "/users");
        assert_eq!(normalize("users/{id}"), "/users/{id}");
    }

    #[test]
    fn strips_one_trailing_slash() {
        assert_eq!(normalize("/users/"), "/users");
        assert_eq!(normalize("test/"), "/test");
        assert_eq!(normalize("/a//"), "/a/");
    }

    #[test]
    fn root_normalizes_to_empty() {
        assert_eq!(normalize("/"), "");
    }

    #[test]
    fn already_normalized_is_unchanged() {
        assert_eq!(normalize("/api/v1"), "/api/v1");
    }

    #[test]
    fn normalized_output_shape() {
        for input in ["", "/", "a", "a/", "/a", "/a/", "a/b/", "//", "/{id}"] {
            let out = normalize(input);
            assert!(out.is_empty() || out.starts_with('/'), "{input:?} -> {out:?}");
            if input != "//" {
                assert!(!out.ends_with('/'), "{input:?} -> {out:?}");
            }
        }
    }

    #[test]
    fn join_concatenates_without_separator() {
        assert_eq!(join("/api", "/hello"), "/api/hello");
        assert_eq!(join("/api", ""), "/api");
        assert_eq!(join("", "/hello"), "/hello");
        assert_eq!(join("", ""), "");
    }

    #[test]
    fn colon_params_become_captures() {
        assert_eq!(to_route_pattern("/users/:id").as_deref(), Some("/users/{id}"));
        assert_eq!(
            to_route_pattern("/orgs/:org_id/users/:userId").as_deref(),
            Some("/orgs/{org_id}/users/{userId}")
        );
        assert_eq!(to_route_pattern("/plain").as_deref(), Some("/plain"));
        assert_eq!(to_route_pattern("/").as_deref(), Some("/"));
    }

    #[test]
    fn unsupported_segments_are_rejected() {
        assert_eq!(to_route_pattern("/users/:id?"), None);
        assert_eq!(to_route_pattern("/users/:"), None);
        assert_eq!(to_route_pattern("/files/*"), None);
        assert_eq!(to_route_pattern("/users/{id"), None);
    }

    #[test]
    fn shape_ignores_capture_names() {
        assert_eq!(pattern_shape("/users/{id}"), pattern_shape("/users/{name}"));
        assert_eq!(pattern_shape("/files/{*rest}"), "/files/{*}");
        assert_ne!(pattern_shape("/users/{id}"), pattern_shape("/users/me"));
    }
}
