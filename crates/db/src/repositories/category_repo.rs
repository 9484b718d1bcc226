//! Repository for the `categories` table.

use async_trait::async_trait;
use catalog_core::category::{Category, CategoryFilter, CATEGORY_SORTABLE_FIELDS};
use catalog_core::entity::Entity;
use catalog_core::error::CoreError;
use catalog_core::identifier::CategoryId;
use catalog_core::repository::{Repository, SearchableRepository};
use catalog_core::search::{SearchParams, SearchResult};
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use super::query::{limit_offset, order_by, where_clause};
use crate::models::category::CategoryRow;

/// Column list for the `categories` table.
const COLUMNS: &str = "id, name, description, is_active, created_at";

/// Category persistence backed by PostgreSQL.
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn conditions(filter: Option<&CategoryFilter>) -> Vec<String> {
        let mut conditions = Vec::new();
        if filter.is_some() {
            conditions.push("strpos(lower(name), lower($1)) > 0".to_string());
        }
        conditions
    }
}

#[async_trait]
impl Repository<Category> for PgCategoryRepository {
    async fn insert(&self, entity: &Category) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO categories (id, name, description, is_active, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(*entity.category_id().as_uuid())
        .bind(entity.name())
        .bind(entity.description())
        .bind(entity.is_active())
        .bind(entity.created_at())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    async fn bulk_insert(&self, entities: &[Category]) -> Result<(), CoreError> {
        if entities.is_empty() {
            return Ok(());
        }
        let ids: Vec<Uuid> = entities.iter().map(|c| *c.category_id().as_uuid()).collect();
        let names: Vec<&str> = entities.iter().map(Category::name).collect();
        let descriptions: Vec<Option<&str>> = entities.iter().map(Category::description).collect();
        let actives: Vec<bool> = entities.iter().map(Category::is_active).collect();
        let created: Vec<_> = entities.iter().map(Category::created_at).collect();

        sqlx::query(
            "INSERT INTO categories (id, name, description, is_active, created_at) \
             SELECT * FROM UNNEST($1::uuid[], $2::varchar[], $3::text[], $4::bool[], $5::timestamptz[])",
        )
        .bind(&ids)
        .bind(&names)
        .bind(&descriptions)
        .bind(&actives)
        .bind(&created)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        let row = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(row.map(Category::from))
    }

    async fn find_all(&self) -> Result<Vec<Category>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY created_at");
        let rows = sqlx::query_as::<_, CategoryRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn update(&self, entity: &Category) -> Result<(), CoreError> {
        let result = sqlx::query(
            "UPDATE categories SET name = $2, description = $3, is_active = $4 WHERE id = $1",
        )
        .bind(*entity.category_id().as_uuid())
        .bind(entity.name())
        .bind(entity.description())
        .bind(entity.is_active())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found(Category::NAME, entity.category_id()));
        }
        Ok(())
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found(Category::NAME, id));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<Category, CategoryFilter> for PgCategoryRepository {
    fn sortable_fields(&self) -> &'static [&'static str] {
        CATEGORY_SORTABLE_FIELDS
    }

    async fn search(
        &self,
        params: &SearchParams<CategoryFilter>,
    ) -> Result<SearchResult<Category>, CoreError> {
        let filter = params.filter();
        let conditions = Self::conditions(filter);
        let where_clause = where_clause(&conditions);
        let bind_idx = conditions.len() + 1;

        let count_query = format!("SELECT COUNT(*) FROM categories {where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(name) = filter {
            count = count.bind(name);
        }
        let total = count.fetch_one(&self.pool).await.map_err(db_error)?;

        let query = format!(
            "SELECT {COLUMNS} FROM categories {where_clause} {order} \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            order = order_by(params, CATEGORY_SORTABLE_FIELDS, ""),
            next_idx = bind_idx + 1,
        );
        let (limit, offset) = limit_offset(params);
        let mut q = sqlx::query_as::<_, CategoryRow>(&query);
        if let Some(name) = filter {
            q = q.bind(name);
        }
        let rows = q
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        tracing::debug!(
            total,
            page = params.page(),
            per_page = params.per_page(),
            "Searched categories"
        );

        Ok(SearchResult::new(
            rows.into_iter().map(Category::from).collect(),
            u64::try_from(total).unwrap_or_default(),
            params.page(),
            params.per_page(),
        ))
    }
}
