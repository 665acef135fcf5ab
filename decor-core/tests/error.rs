use axum::http::StatusCode;
use axum::response::IntoResponse;
use decor_core::{HttpError, ResolveError};
use http_body_util::BodyExt;

async fn error_parts(err: HttpError) -> (StatusCode, serde_json::Value) {
    let resp = err.into_response();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_status() {
    let (status, body) = error_parts(HttpError::NotFound("User 7 not found".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User 7 not found");
}

#[tokio::test]
async fn bad_request_status() {
    let (status, body) = error_parts(HttpError::BadRequest("invalid input".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid input");
}

#[tokio::test]
async fn unauthorized_status() {
    let (status, body) = error_parts(HttpError::Unauthorized("no token".into())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "no token");
}

#[tokio::test]
async fn custom_keeps_body() {
    let err = HttpError::Custom {
        status: StatusCode::CONFLICT,
        body: serde_json::json!({ "error": "taken", "field": "email" }),
    };
    let (status, body) = error_parts(err).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["field"], "email");
}

#[tokio::test]
async fn io_error_is_internal() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    let (status, body) = error_parts(HttpError::from(io)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "disk full");
}

#[tokio::test]
async fn resolve_error_is_internal() {
    let err = ResolveError::NoProvider {
        identifier: "Greeter".into(),
    };
    let (status, body) = error_parts(HttpError::from(err)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "No provider for Greeter");
}

struct ParseFailure;

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("could not parse")
    }
}

decor_core::map_error! {
    ParseFailure => BadRequest,
}

#[test]
fn map_error_generates_from_impl() {
    let err: HttpError = ParseFailure.into();
    assert_eq!(err.to_string(), "Bad Request: could not parse");
}
