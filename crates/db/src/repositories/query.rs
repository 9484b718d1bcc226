//! SQL fragments shared by the searchable repositories.

use catalog_core::memory::FALLBACK_SORT_FIELD;
use catalog_core::search::{SearchParams, SortDirection};

/// Build the `ORDER BY` clause for a search.
///
/// Only names in `sortable` are accepted; anything else falls back to
/// newest first. `name` sorts by byte order so results match the
/// in-memory backend regardless of the database locale.
pub fn order_by<F>(params: &SearchParams<F>, sortable: &[&str], table_alias: &str) -> String {
    let (field, dir) = match params.sort() {
        Some(field) if sortable.contains(&field) => {
            (field, params.sort_dir().unwrap_or(SortDirection::Asc))
        }
        _ => (FALLBACK_SORT_FIELD, SortDirection::Desc),
    };
    let column = match field {
        "name" => format!("{table_alias}name COLLATE \"C\""),
        other => format!("{table_alias}{other}"),
    };
    format!("ORDER BY {column} {}", dir.as_sql())
}

/// `(limit, offset)` as bindable integers.
pub fn limit_offset<F>(params: &SearchParams<F>) -> (i64, i64) {
    (to_i64(params.per_page()), to_i64(params.offset()))
}

/// Clamp a count to the `BIGINT` range.
pub fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Join WHERE conditions, or produce an empty string when there are none.
pub fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}
