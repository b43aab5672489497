//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use reqcheck_api::error::AppError;
use reqcheck_core::error::CoreError;
use reqcheck_core::validation::FieldViolation;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: rejected requests map to 422 with the full violation list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_rejection_returns_422_with_errors() {
    let err = AppError::rejected(vec![
        FieldViolation::new("email", "email", ""),
        FieldViolation::new("avatar", "file_size", "2097152"),
    ]);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "VALIDATION_FAILED");
    assert_eq!(json["error"], "Validation failed");

    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["failed_field"], "email");
    assert_eq!(errors[1]["tag"], "file_size");
    assert_eq!(errors[1]["value"], "2097152");
    assert!(errors[0].get("message").is_none());
}

#[tokio::test]
async fn validation_rejection_keeps_custom_message() {
    let err = AppError::Validation {
        violations: vec![FieldViolation::new("avatar", "required", "")
            .with_message("Please attach an avatar")],
        message: Some("Profile is incomplete".into()),
    };

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "Profile is incomplete");
    assert_eq!(json["errors"][0]["message"], "Please attach an avatar");
}

// ---------------------------------------------------------------------------
// Test: CoreError::MalformedBody maps to 400 with the parser message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_body_returns_400() {
    let err = AppError::Core(CoreError::MalformedBody("expected value at line 1".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Body parser error: expected value at line 1");
    assert!(json.get("errors").is_none());
}

// ---------------------------------------------------------------------------
// Test: CoreError::FileRetrieval maps to 500 without leaking the cause
// ---------------------------------------------------------------------------

#[tokio::test]
async fn file_retrieval_error_returns_500_and_sanitizes_reason() {
    let err = AppError::Core(CoreError::FileRetrieval {
        field: "avatar".into(),
        reason: "/tmp/upload-1234 permission denied".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "UPLOAD_ERROR");
    assert_eq!(json["error"], "File avatar could not be read");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn core_validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Invalid page".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Invalid page");
}

// ---------------------------------------------------------------------------
// Test: internal errors map to 500 and sanitize the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("accepted profile has no avatar".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: CoreError converts into AppError via `?`
// ---------------------------------------------------------------------------

#[test]
fn core_error_converts_via_from() {
    fn fails() -> Result<(), AppError> {
        Err(CoreError::MalformedBody("eof".into()))?
    }

    assert!(matches!(
        fails(),
        Err(AppError::Core(CoreError::MalformedBody(_)))
    ));
}
