//! Type aliases for common controller return types.
//!
//! ```ignore
//! async fn list(&self) -> JsonResult<Vec<User>> {
//!     Ok(Json(self.users.list()))
//! }
//! ```

use crate::error::HttpError;
use crate::http::{Json, StatusCode};

/// Any response type with [`HttpError`].
pub type ApiResult<T> = Result<T, HttpError>;

/// `Result<Json<T>, HttpError>`.
pub type JsonResult<T> = Result<Json<T>, HttpError>;

/// Endpoints that answer with a bare status code (e.g. DELETE).
pub type StatusResult = Result<StatusCode, HttpError>;
