//! Request validation engine.
//!
//! Provides the rule and outcome types, the field-validator capability, the
//! per-file checks, and the orchestrator that merges them, all without any
//! transport dependencies.

pub mod field;
pub mod file_rules;
pub mod orchestrator;
pub mod rules;

pub use field::{DeriveValidator, FieldError, FieldValidator};
pub use orchestrator::{check_files, validate, validate_struct};
pub use rules::{
    FieldViolation, FileRule, ImageResolution, ValidationOutcome, TAG_FILE_EXTENSION,
    TAG_FILE_SIZE, TAG_REQUIRED, TAG_RESOLUTION,
};
