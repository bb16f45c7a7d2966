//! Request extractors
//!
//! Thin wrappers over axum's extractors so that malformed paths, query
//! strings and bodies are reported through [`AppError`] like every other
//! client error.

use crate::error::AppError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON body extractor
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Query string extractor
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
