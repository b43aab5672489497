//! The `Validated<T>` extractor.
//!
//! Runs the full validation pipeline before a handler executes. Handlers that
//! take `Validated<T>` only ever see a value that passed both its derive rules
//! and its declared [`FileRules`]; every other request ends in exactly one
//! error response.

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use reqcheck_core::error::CoreError;
use reqcheck_core::validation::{self, FileRule, ValidationOutcome};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;
use crate::upload::UploadForm;

/// Declares the upload constraints for a request type.
///
/// The default declares none, so plain JSON payloads only need
/// `impl FileRules for MyRequest {}`.
pub trait FileRules {
    fn file_rules() -> Vec<FileRule> {
        Vec::new()
    }
}

/// A request body that passed validation, plus the buffered form it came from
/// (so handlers can read the accepted files).
#[derive(Debug)]
pub struct Validated<T> {
    pub value: T,
    pub form: UploadForm,
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + FileRules + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let form = read_form(req, state).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Could not read request body");
        })?;

        let rules = T::file_rules();
        match validation::validate_struct::<T, _>(&form, &rules)? {
            ValidationOutcome::Accepted(value) => Ok(Validated { value, form }),
            ValidationOutcome::Rejected(violations) => {
                tracing::debug!(
                    violations = violations.len(),
                    target_type = std::any::type_name::<T>(),
                    "Request rejected by validation"
                );
                Err(AppError::rejected(violations))
            }
        }
    }
}

/// Buffer the body according to its content type.
async fn read_form<S: Send + Sync>(req: Request, state: &S) -> Result<UploadForm, CoreError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();
    let mime = content_type.split(';').next().unwrap_or("").trim().to_string();

    match mime.as_str() {
        "multipart/form-data" => {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| CoreError::MalformedBody(e.body_text()))?;
            UploadForm::from_multipart(multipart).await
        }
        "application/json" => {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|e| CoreError::MalformedBody(e.body_text()))?;
            Ok(UploadForm::from_json(bytes.to_vec()))
        }
        "application/x-www-form-urlencoded" => {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|e| CoreError::MalformedBody(e.body_text()))?;
            UploadForm::from_urlencoded(&bytes)
        }
        other => Err(CoreError::MalformedBody(format!(
            "Unsupported content type '{other}'"
        ))),
    }
}
