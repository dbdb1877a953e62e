use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::article::upload::UploadError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only fixed, user-safe messages reach the response body. The wrapped detail
/// is logged and stays on the server.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(&'static str),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Generation error: {0}")]
    Generation(#[from] LlmError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", *msg),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "The uploaded file is too large",
            ),
            AppError::Generation(LlmError::Auth) => {
                tracing::error!("Generation API rejected or lacks a credential");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AUTH_ERROR",
                    "The article service is not configured correctly",
                )
            }
            AppError::Generation(LlmError::RateLimited) => {
                tracing::error!("Generation API rate limit reached");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RATE_LIMITED",
                    "The article service is busy, please try again later",
                )
            }
            AppError::Generation(e @ LlmError::Transport(_)) => {
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_FAILED",
                    "Failed to generate article",
                )
            }
            AppError::Upload(e) => {
                tracing::error!("Upload error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO_FAILURE",
                    "Failed to read the uploaded file",
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code
        }));

        (status, body).into_response()
    }
}
