//! Decode, validate fields, validate files, merge.

use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::CoreError;
use crate::naming::normalize_field_path;
use crate::upload::RequestSource;

use super::field::{DeriveValidator, FieldValidator};
use super::file_rules::{check_file, check_resolution};
use super::rules::{FieldViolation, FileRule, ValidationOutcome, TAG_REQUIRED};

/// Validate a request against a field validator and a list of file rules.
///
/// Field violations come first, in the order the validator reported them,
/// followed by file violations in rule declaration order. A malformed body or
/// an unreadable file aborts the call with an error instead.
pub fn validate<T, R, V>(
    request: &R,
    file_rules: &[FileRule],
    field_validator: &V,
) -> Result<ValidationOutcome<T>, CoreError>
where
    T: DeserializeOwned,
    R: RequestSource,
    V: FieldValidator<T> + ?Sized,
{
    let value: T = request.decode()?;

    let mut violations: Vec<FieldViolation> = field_validator
        .check(&value)
        .into_iter()
        .map(|e| FieldViolation {
            failed_field: normalize_field_path(&e.field),
            tag: e.tag,
            value: e.param,
            message: e.message,
        })
        .collect();

    violations.extend(check_files(request, file_rules)?);

    Ok(ValidationOutcome::from_violations(value, violations))
}

/// [`validate`] with the `validator` derive as the field validator.
pub fn validate_struct<T, R>(
    request: &R,
    file_rules: &[FileRule],
) -> Result<ValidationOutcome<T>, CoreError>
where
    T: DeserializeOwned + Validate,
    R: RequestSource,
{
    validate(request, file_rules, &DeriveValidator)
}

/// Evaluate file rules only, in declaration order.
///
/// At most one violation is produced per rule.
pub fn check_files<R: RequestSource>(
    request: &R,
    file_rules: &[FileRule],
) -> Result<Vec<FieldViolation>, CoreError> {
    let mut violations = Vec::new();

    for rule in file_rules {
        let Some(file) = request.file(&rule.field)? else {
            if rule.required {
                violations.push(FieldViolation::new(&rule.field, TAG_REQUIRED, ""));
            }
            continue;
        };

        if let Some(v) = check_file(&rule.field, file, &rule.extensions, rule.max_size_mb) {
            violations.push(v);
            continue;
        }

        if let Some(resolution) = rule.resolution {
            if let Some(v) = check_resolution(&rule.field, file, resolution)? {
                violations.push(v);
            }
        }
    }

    Ok(violations)
}
