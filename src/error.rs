// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("LLM API error: {0}")]
    LlmApi(String),

    #[error("Malformed LLM reply: {0}")]
    MalformedLlmReply(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Marker message for upstream rate limiting (HTTP 429 from the provider).
    pub const LLM_RATE_LIMIT: &'static str = "rate limit exceeded";

    /// True if this error is an upstream rate-limit rejection.
    pub fn is_llm_rate_limit(&self) -> bool {
        matches!(self, AppError::LlmApi(msg) if msg.contains(Self::LLM_RATE_LIMIT))
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::LlmApi(msg) => (StatusCode::BAD_GATEWAY, "llm_error", Some(msg.clone())),
            AppError::MalformedLlmReply(msg) => {
                tracing::warn!(error = %msg, "Rejected malformed LLM reply");
                (StatusCode::BAD_GATEWAY, "malformed_llm_reply", None)
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
