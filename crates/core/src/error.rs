/// Failures that abort a validation call before an outcome is produced.
///
/// These are never mixed into a violation list: a call either fails with one
/// of these, or yields a [`ValidationOutcome`](crate::validation::ValidationOutcome).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The request body could not be decoded into the target type.
    #[error("Body parser error: {0}")]
    MalformedBody(String),

    /// An uploaded file was present but could not be read.
    #[error("File {field} error: {reason}")]
    FileRetrieval { field: String, reason: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}
