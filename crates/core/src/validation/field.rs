//! The field-validator capability.
//!
//! The orchestrator only needs "object in, ordered `{field, tag, param}` out".
//! [`DeriveValidator`] adapts `#[derive(validator::Validate)]` types; any
//! closure with the right shape works too, which keeps tests free of derive
//! boilerplate.

use serde_json::Value;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// One violation as reported by a field validator, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub tag: String,
    pub param: String,
    pub message: Option<String>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, tag: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            tag: tag.into(),
            param: param.into(),
            message: None,
        }
    }
}

/// Produces zero or more field violations for a decoded value.
pub trait FieldValidator<T: ?Sized> {
    fn check(&self, value: &T) -> Vec<FieldError>;
}

impl<T: ?Sized, F> FieldValidator<T> for F
where
    F: Fn(&T) -> Vec<FieldError>,
{
    fn check(&self, value: &T) -> Vec<FieldError> {
        self(value)
    }
}

/// Adapter for types deriving [`validator::Validate`].
///
/// `ValidationErrors` is keyed by a hash map, so fields are reported in
/// field-path order; errors for one field keep the order the derive produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeriveValidator;

impl<T: Validate> FieldValidator<T> for DeriveValidator {
    fn check(&self, value: &T) -> Vec<FieldError> {
        match value.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => flatten(&errors),
        }
    }
}

/// Flatten nested `ValidationErrors` into dotted field paths.
///
/// Paths sort segment by segment, with list indices compared numerically
/// (`items[2]` before `items[10]`).
pub fn flatten(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(errors, None, &mut out);
    out.sort_by_cached_key(|e| path_key(&e.field));
    out
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum PathSegment {
    Name(String),
    Index(usize),
}

/// Split `a.b[3].c` into `[a, b, 3, c]`.
fn path_key(path: &str) -> Vec<PathSegment> {
    let mut key = Vec::new();
    for part in path.split('.') {
        let mut pieces = part.split('[');
        if let Some(name) = pieces.next().filter(|n| !n.is_empty()) {
            key.push(PathSegment::Name(name.to_string()));
        }
        for piece in pieces {
            let index = piece.trim_end_matches(']');
            match index.parse() {
                Ok(i) => key.push(PathSegment::Index(i)),
                Err(_) => key.push(PathSegment::Name(index.to_string())),
            }
        }
    }
    key
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<FieldError>) {
    for (name, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|e| FieldError {
                    field: path.clone(),
                    tag: e.code.to_string(),
                    param: render_params(&e.params),
                    message: e.message.as_ref().map(|m| m.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}

/// Render rule parameters as a short string.
///
/// The offending `value` entry is dropped. A single parameter renders as its
/// bare value (`min = 3` -> `"3"`); several render as sorted `key=value` pairs.
fn render_params<K>(params: &std::collections::HashMap<K, Value>) -> String
where
    K: AsRef<str>,
{
    let mut entries: Vec<(&str, &Value)> = params
        .iter()
        .map(|(k, v)| (k.as_ref(), v))
        .filter(|(k, _)| *k != "value")
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    match entries.as_slice() {
        [] => String::new(),
        [(_, value)] => render_value(value),
        many => many
            .iter()
            .map(|(k, v)| format!("{k}={}", render_value(v)))
            .collect::<Vec<_>>()
            .join(","),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
