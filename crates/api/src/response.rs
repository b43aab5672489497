//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Paginated listings add
//! a `meta` object describing the page that was served.

use reqcheck_core::pagination::{Pagination, SortDirection};
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Page description returned alongside paginated data.
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub per_page: i64,
    pub total: usize,
    pub order_field: String,
    pub order_direction: SortDirection,
}

impl PageMeta {
    pub fn new(pagination: &Pagination, total: usize) -> Self {
        Self {
            page: pagination.page,
            per_page: pagination.per_page,
            total,
            order_field: pagination.order_field.clone(),
            order_direction: pagination.order_direction,
        }
    }
}

/// `{ "data": [...], "meta": {...} }` envelope for list endpoints.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}
