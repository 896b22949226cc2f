use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` extractor whose rejections answer with the `{"error": ...}` body
/// used by every other failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
