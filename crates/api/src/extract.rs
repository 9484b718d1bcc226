//! Extractors whose rejections render through [`AppError`].

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with malformed or mismatched bodies reported as a 422
/// `[{"body": [reason]}]` list.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
