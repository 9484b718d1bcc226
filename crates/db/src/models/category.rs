//! Category row model.

use catalog_core::category::{Category, CategoryProps};
use catalog_core::identifier::CategoryId;
use catalog_core::types::Timestamp;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category::restore(CategoryProps {
            category_id: CategoryId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}
