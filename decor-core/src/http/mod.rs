//! Re-exports of the Axum types controllers and middleware are written against.

pub mod body {
    pub use axum::body::{Body, Bytes};
}

pub mod extract {
    pub use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request, State};
}

pub mod middleware {
    pub use axum::middleware::{from_fn, Next};
}

pub mod response {
    pub use axum::response::{Html, IntoResponse, Redirect, Response};
}

pub mod routing {
    pub use axum::routing::{delete, get, head, options, patch, post, put, MethodRouter, Route};
}

pub use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, Request as HttpRequest, StatusCode, Uri};
pub use axum::{serve, Json, Router};
pub use self::body::Body;
pub use self::extract::{Path, Query, Request};
pub use self::middleware::Next;
pub use self::response::{Html, IntoResponse, Response};
