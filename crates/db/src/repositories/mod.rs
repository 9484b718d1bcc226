//! PostgreSQL implementations of the catalog repository contracts.
//!
//! Each repository owns a clone of the pool and implements
//! [`catalog_core::repository::SearchableRepository`] for its aggregate, so
//! it plugs into the use cases exactly like the in-memory backend.

pub mod cast_member_repo;
pub mod category_repo;
pub mod genre_repo;
pub mod query;

pub use cast_member_repo::PgCastMemberRepository;
pub use category_repo::PgCategoryRepository;
pub use genre_repo::PgGenreRepository;

use catalog_core::error::CoreError;

/// Log a driver error and surface it as an internal failure.
pub(crate) fn db_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(format!("database error: {err}"))
}
