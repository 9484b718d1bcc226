//! Genre row model.

use catalog_core::genre::{Genre, GenreProps};
use catalog_core::identifier::{CategoryId, GenreId};
use catalog_core::types::Timestamp;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from `genres` joined with its `genre_categories` ids.
#[derive(Debug, Clone, FromRow)]
pub struct GenreRow {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub categories_id: Vec<Uuid>,
}

impl From<GenreRow> for Genre {
    fn from(row: GenreRow) -> Self {
        Genre::restore(GenreProps {
            genre_id: GenreId::from_uuid(row.id),
            name: row.name,
            categories_id: row
                .categories_id
                .into_iter()
                .map(CategoryId::from_uuid)
                .collect(),
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}
