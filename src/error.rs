use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Domain errors, translated into HTTP responses at the boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Per-field validation messages, keyed by request field name.
    #[error("validation failed")]
    Validation(BTreeMap<&'static str, String>),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    NotFound(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, expired, or otherwise unusable bearer token.
    #[error("{0}")]
    InvalidToken(String),

    /// Anything else. The detail is logged, never returned to the caller.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        // Unique-constraint violation at insert time is the last line of
        // defense against duplicate registration races.
        if let sqlx::Error::Database(db) = &e {
            if db.code().as_deref() == Some("23505") {
                return ApiError::Duplicate("Username or email already in use".into());
            }
        }
        ApiError::Unexpected(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(fields) => {
                (StatusCode::BAD_REQUEST, Json(json!(fields))).into_response()
            }
            ApiError::Duplicate(msg) => {
                (StatusCode::CONFLICT, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response(),
            ApiError::InvalidToken(msg) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Unexpected(e) => {
                error!(error = %e, "unexpected error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An unexpected error occurred" })),
                )
                    .into_response()
            }
        }
    }
}
