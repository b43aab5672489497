//! Page / sort resolution for list endpoints.
//!
//! Independent of the validation engine: turns raw query strings into a
//! [`Pagination`] with defaults applied and the sort field checked against a
//! per-endpoint allow-list.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Defaults
-------------------------------------------------------------------------- */

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 10;
pub const DEFAULT_ORDER_FIELD: &str = "id";

/* --------------------------------------------------------------------------
Types
-------------------------------------------------------------------------- */

/// Sort direction, serialized as `asc` / `desc`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Raw pagination parameters as read from a query string.
///
/// Kept as strings so a malformed number produces a specific error message
/// instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub order_field: Option<String>,
    pub order_direction: Option<String>,
    pub search: Option<String>,
}

/// Resolved pagination with all defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub offset: i64,
    pub order_field: String,
    pub order_direction: SortDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/* --------------------------------------------------------------------------
Resolution
-------------------------------------------------------------------------- */

/// Resolve raw query parameters against an allow-list of sortable fields.
///
/// Empty values are treated as absent. Page and per-page must be positive
/// integers whose offset fits in an `i64`.
pub fn resolve(
    params: &PaginationParams,
    allowed_order_fields: &[&str],
) -> Result<Pagination, CoreError> {
    let page = parse_positive(params.page.as_deref(), DEFAULT_PAGE, "Invalid page")?;
    let per_page = parse_positive(params.per_page.as_deref(), DEFAULT_PER_PAGE, "Invalid perPage")?;

    let offset = (page - 1)
        .checked_mul(per_page)
        .ok_or_else(|| CoreError::Validation("Invalid page".to_string()))?;

    let order_field = match non_empty(params.order_field.as_deref()) {
        Some(field) if allowed_order_fields.contains(&field) => field.to_string(),
        Some(_) => return Err(CoreError::Validation("Invalid order field".to_string())),
        None => DEFAULT_ORDER_FIELD.to_string(),
    };

    let order_direction = match non_empty(params.order_direction.as_deref()) {
        Some(raw) => SortDirection::parse(raw)
            .ok_or_else(|| CoreError::Validation("Invalid order direction".to_string()))?,
        None => SortDirection::default(),
    };

    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(Pagination {
        page,
        per_page,
        offset,
        order_field,
        order_direction,
        search,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_positive(raw: Option<&str>, default: i64, message: &str) -> Result<i64, CoreError> {
    match non_empty(raw) {
        None => Ok(default),
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(CoreError::Validation(message.to_string())),
        },
    }
}
