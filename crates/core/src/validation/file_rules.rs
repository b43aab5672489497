//! Checks for a single uploaded file.
//!
//! Each check yields at most one violation. Only the resolution check touches
//! the file content, and it reads no further than the image header.

use image::ImageReader;

use crate::error::CoreError;
use crate::upload::UploadedFile;

use super::rules::{
    FieldViolation, ImageResolution, TAG_FILE_EXTENSION, TAG_FILE_SIZE, TAG_RESOLUTION,
};

/// Extension of the last path element, including the leading dot.
///
/// Returns `""` when the name has no dot after its final `/`.
pub fn file_extension(filename: &str) -> &str {
    let base_start = filename.rfind('/').map_or(0, |i| i + 1);
    let base = &filename[base_start..];
    match base.rfind('.') {
        Some(dot) => &base[dot..],
        None => "",
    }
}

/// Exact, case-sensitive match against the allow-list.
pub fn check_extension<F: UploadedFile + ?Sized>(
    field: &str,
    file: &F,
    allowed: &[String],
) -> Option<FieldViolation> {
    let ext = file_extension(file.filename());
    if allowed.iter().any(|a| a == ext) {
        None
    } else {
        Some(FieldViolation::new(field, TAG_FILE_EXTENSION, allowed.join(", ")))
    }
}

/// Fails when the size is strictly greater than `max_size_mb` MiB.
///
/// The violation value is the exact byte threshold, so a fractional ceiling
/// such as 0.001 MiB reports `"1048.576"`.
pub fn check_size<F: UploadedFile + ?Sized>(
    field: &str,
    file: &F,
    max_size_mb: f64,
) -> Option<FieldViolation> {
    let threshold = max_size_mb * 1024.0 * 1024.0;
    if (file.size() as f64) > threshold {
        Some(FieldViolation::new(field, TAG_FILE_SIZE, format_bytes(threshold)))
    } else {
        None
    }
}

/// Six decimal places with trailing zeros (and a bare point) removed.
fn format_bytes(bytes: f64) -> String {
    let fixed = format!("{bytes:.6}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Extension then size, stopping at the first failure.
pub fn check_file<F: UploadedFile + ?Sized>(
    field: &str,
    file: &F,
    allowed: &[String],
    max_size_mb: f64,
) -> Option<FieldViolation> {
    check_extension(field, file, allowed).or_else(|| check_size(field, file, max_size_mb))
}

/// Compare the image header's dimensions with `required`, both exactly.
///
/// An unreadable or unrecognised image counts as a mismatch. Only a failure to
/// open the stream at all is an error.
pub fn check_resolution<F: UploadedFile + ?Sized>(
    field: &str,
    file: &F,
    required: ImageResolution,
) -> Result<Option<FieldViolation>, CoreError> {
    let stream = file.open().map_err(|e| CoreError::FileRetrieval {
        field: field.to_string(),
        reason: e.to_string(),
    })?;

    let dimensions = ImageReader::new(stream)
        .with_guessed_format()
        .ok()
        .and_then(|reader| reader.into_dimensions().ok());

    match dimensions {
        Some((width, height)) if width == required.width && height == required.height => Ok(None),
        _ => Ok(Some(FieldViolation::new(
            field,
            TAG_RESOLUTION,
            required.to_string(),
        ))),
    }
}
