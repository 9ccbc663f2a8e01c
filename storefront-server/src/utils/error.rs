//! Unified Error Handling
//!
//! Application-wide error type and failure response body.
//!
//! Expected conditions (missing user, missing cart, missing line) are
//! returned by handlers as `{success:false, message}` bodies; `AppError`
//! as a rejection is reserved for the remaining failure paths.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Minimal status body: `{success, message?}`
#[derive(Debug, Serialize)]
pub struct ApiStatus {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiStatus {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Business Logic Errors ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A cart exists but the referenced line does not. Kept distinct from
    /// [`AppError::NotFound`] so callers can tell "no cart" from "no line".
    #[error("Cart line not found: {0}")]
    LineNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Concurrent modification: {0}")]
    Conflict(String),

    // ========== Boundary Errors ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Upstream service error: {0}")]
    Upstream(String),

    // ========== System Errors ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::LineNotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Authentication required".into())
            }
            AppError::Upstream(msg) => {
                error!(target: "upstream", error = %msg, "Upstream service failed");
                (StatusCode::BAD_GATEWAY, "Upstream service error".into())
            }
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".into())
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        let body = Json(ApiStatus::failed(message));
        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn line_not_found(msg: impl Into<String>) -> Self {
        Self::LineNotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error is an expected condition that handlers report as
    /// a `{success:false}` body instead of an HTTP rejection
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_) | AppError::LineNotFound(_) | AppError::Validation(_)
        )
    }
}

impl From<shared::money::MoneyError> for AppError {
    fn from(e: shared::money::MoneyError) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Result type for handlers and services
pub type AppResult<T> = Result<T, AppError>;
