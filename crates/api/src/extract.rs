//! Request extractors whose rejections use the [`AppError`] body.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with rejections (missing content type, malformed or
/// mistyped body) reported as `400 BAD_REQUEST` JSON errors.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
