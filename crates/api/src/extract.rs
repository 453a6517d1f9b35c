//! Request extractors that report failures in the API error format.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body.
///
/// Same as [`axum::Json`], except a body that fails to parse or deserialize
/// is rejected as `400 INVALID_ARGUMENT` with the usual `{"error","code"}`
/// payload instead of axum's plain-text 4xx.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
