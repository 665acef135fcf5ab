use std::time::Instant;

use decor::prelude::*;
use tracing::info;

/// Logs method, path, status and latency of every request.
pub fn request_log() -> MiddlewareHandler {
    MiddlewareHandler::from_fn(|req: Request, next: Next| async move {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let started = Instant::now();
        let resp = next.run(req).await;
        info!(
            %method,
            %path,
            status = resp.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request"
        );
        resp
    })
    .named("request_log")
}

/// Stamps `x-served-by` with the name of the controller that answered.
pub fn served_by(controller: &'static str) -> MiddlewareHandler {
    MiddlewareHandler::from_fn(move |req: Request, next: Next| async move {
        let mut resp = next.run(req).await;
        resp.headers_mut()
            .insert("x-served-by", HeaderValue::from_static(controller));
        resp
    })
    .named("served_by")
}

/// Rejects requests without a JSON body with 415.
pub fn require_json() -> MiddlewareHandler {
    MiddlewareHandler::from_fn(|req: Request, next: Next| async move {
        let is_json = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));
        if !is_json {
            return HttpError::Custom {
                status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                body: serde_json::json!({ "error": "Expected application/json" }),
            }
            .into_response();
        }
        next.run(req).await
    })
    .named("require_json")
}
