//! Shared query parameter types for API handlers.

use reqcheck_core::pagination::{self, Pagination};

use crate::error::AppResult;

/// Pagination parameters (`?page=&per_page=&order_field=&order_direction=&search=`).
///
/// Values arrive as raw strings; [`resolve_pagination`] applies defaults and
/// produces the specific `Invalid ...` messages.
pub use reqcheck_core::pagination::PaginationParams as PaginationQuery;

/// Resolve a pagination query against the endpoint's sortable fields.
pub fn resolve_pagination(
    query: &PaginationQuery,
    allowed_order_fields: &[&str],
) -> AppResult<Pagination> {
    Ok(pagination::resolve(query, allowed_order_fields)?)
}
