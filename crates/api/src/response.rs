//! Shared response envelope types for API handlers.
//!
//! Single resources use `{ "data": ... }`; lists add a `meta` block with
//! pagination details.

use catalog_core::use_case::PaginationOutput;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub total: u64,
    pub current_page: u64,
    pub per_page: u64,
    pub last_page: u64,
}

/// `{ "data": [...], "meta": {...} }` envelope for paginated lists.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T: Serialize> From<PaginationOutput<T>> for ListResponse<T> {
    fn from(output: PaginationOutput<T>) -> Self {
        Self {
            data: output.items,
            meta: PageMeta {
                total: output.total,
                current_page: output.current_page,
                per_page: output.per_page,
                last_page: output.last_page,
            },
        }
    }
}
