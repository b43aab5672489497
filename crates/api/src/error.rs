use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reqcheck_core::error::CoreError;
use reqcheck_core::validation::FieldViolation;
use serde_json::json;

/// Message used when a rejection carries no caller-supplied summary.
pub const DEFAULT_VALIDATION_MESSAGE: &str = "Validation failed";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for engine failures and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A structural failure from `reqcheck_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// One or more field/file rules failed.
    #[error("{} validation error(s)", .violations.len())]
    Validation {
        violations: Vec<FieldViolation>,
        message: Option<String>,
    },

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Rejection carrying the full violation list.
    pub fn rejected(violations: Vec<FieldViolation>) -> Self {
        AppError::Validation {
            violations,
            message: None,
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            // --- Field / file rule violations ---
            AppError::Validation {
                violations,
                message,
            } => {
                let body = json!({
                    "error": message.unwrap_or_else(|| DEFAULT_VALIDATION_MESSAGE.to_string()),
                    "code": "VALIDATION_FAILED",
                    "errors": violations,
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
            }

            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::MalformedBody(_) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", core.to_string())
                }
                CoreError::FileRetrieval { field, reason } => {
                    tracing::error!(%field, error = %reason, "Upload retrieval failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "UPLOAD_ERROR",
                        format!("File {field} could not be read"),
                    )
                }
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            },

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
