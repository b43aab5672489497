//! Validation rule and result types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Rule tags
-------------------------------------------------------------------------- */

/// A required file field had no upload.
pub const TAG_REQUIRED: &str = "required";

/// The file extension is not in the allow-list.
pub const TAG_FILE_EXTENSION: &str = "file_extension";

/// The file exceeds the size ceiling.
pub const TAG_FILE_SIZE: &str = "file_size";

/// The image could not be decoded or its dimensions differ from the required ones.
pub const TAG_RESOLUTION: &str = "resolution";

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/* --------------------------------------------------------------------------
Violations and outcomes
-------------------------------------------------------------------------- */

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub failed_field: String,
    pub tag: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldViolation {
    pub fn new(failed_field: impl Into<String>, tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            failed_field: failed_field.into(),
            tag: tag.into(),
            value: value.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Result of one validation call.
///
/// `Rejected` always carries at least one violation; build it through
/// [`ValidationOutcome::from_violations`] to keep that true.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome<T> {
    Accepted(T),
    Rejected(Vec<FieldViolation>),
}

impl<T> ValidationOutcome<T> {
    /// `Accepted(value)` when `violations` is empty, `Rejected` otherwise.
    pub fn from_violations(value: T, violations: Vec<FieldViolation>) -> Self {
        if violations.is_empty() {
            ValidationOutcome::Accepted(value)
        } else {
            ValidationOutcome::Rejected(violations)
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted(_))
    }

    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            ValidationOutcome::Accepted(_) => &[],
            ValidationOutcome::Rejected(violations) => violations,
        }
    }

    pub fn into_result(self) -> Result<T, Vec<FieldViolation>> {
        match self {
            ValidationOutcome::Accepted(value) => Ok(value),
            ValidationOutcome::Rejected(violations) => Err(violations),
        }
    }
}

/* --------------------------------------------------------------------------
File rules
-------------------------------------------------------------------------- */

/// Exact pixel dimensions an uploaded image must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResolution {
    pub width: u32,
    pub height: u32,
}

impl ImageResolution {
    /// Both dimensions must be positive.
    pub fn new(width: u32, height: u32) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::Validation(format!(
                "Image resolution must be positive (got {width}x{height})"
            )));
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for ImageResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Constraints for one named upload field.
///
/// ```
/// use reqcheck_core::validation::{FileRule, ImageResolution};
///
/// let rule = FileRule::new("avatar")
///     .required()
///     .extensions([".jpg", ".png"])
///     .max_size_mb(2.0)
///     .resolution(ImageResolution::new(100, 100).unwrap());
///
/// assert_eq!(rule.max_size_bytes(), 2_097_152.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRule {
    pub field: String,
    pub required: bool,
    pub extensions: Vec<String>,
    pub max_size_mb: f64,
    pub resolution: Option<ImageResolution>,
}

impl FileRule {
    /// An optional field with an empty allow-list and no size ceiling.
    ///
    /// An empty allow-list rejects every file, so callers are expected to
    /// follow up with [`extensions`](Self::extensions).
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            required: false,
            extensions: Vec::new(),
            max_size_mb: f64::INFINITY,
            resolution: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Allowed extensions, compared exactly (case-sensitive, leading dot included).
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_size_mb(mut self, max_size_mb: f64) -> Self {
        self.max_size_mb = max_size_mb;
        self
    }

    pub fn resolution(mut self, resolution: ImageResolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// The size ceiling in bytes (`max_size_mb * 1024 * 1024`).
    pub fn max_size_bytes(&self) -> f64 {
        self.max_size_mb * BYTES_PER_MIB
    }
}
