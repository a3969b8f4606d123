// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::extract::rejection::JsonRejection;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient credits")]
    InsufficientCredits,

    #[error("Invalid credentials")]
    Auth,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Code generation failed: {0}")]
    Generation(String),

    #[error("Payment provider error: {0}")]
    PaymentApi(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::InsufficientCredits => {
                (StatusCode::BAD_REQUEST, "Insufficient credits".to_string(), None)
            }
            // Deliberately vague: never reveal which credential field was wrong.
            AppError::Auth => (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string(), None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Generation(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Code generation failed".to_string(),
                Some(msg.clone()),
            ),
            AppError::PaymentApi(msg) => {
                (StatusCode::BAD_GATEWAY, "Payment provider error".to_string(), Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string(), None)
            }
        };

        let body = ErrorResponse { message, detail };

        (status, Json(body)).into_response()
    }
}

/// Malformed request bodies surface as 400, not axum's default 422.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// JSON extractor whose rejection renders through [`AppError`].
#[derive(axum::extract::FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
