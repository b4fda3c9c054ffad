//! Request extractors whose rejections render as [`ApiError`] JSON bodies.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON request body. Malformed or mistyped bodies become `ApiError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// URL query string. Unparseable parameters become `ApiError::BadRequest`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
