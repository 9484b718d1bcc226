//! Repository for the `genres` and `genre_categories` tables.

use async_trait::async_trait;
use catalog_core::entity::Entity;
use catalog_core::error::CoreError;
use catalog_core::genre::{Genre, GenreFilter, GENRE_SORTABLE_FIELDS};
use catalog_core::identifier::GenreId;
use catalog_core::repository::{Repository, SearchableRepository};
use catalog_core::search::{SearchParams, SearchResult};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::db_error;
use super::query::{limit_offset, order_by, where_clause};
use crate::models::genre::GenreRow;

/// Column list for `genres g`, with the linked category ids aggregated
/// into an array.
const COLUMNS: &str = "g.id, g.name, g.is_active, g.created_at, \
    ARRAY(SELECT gc.category_id FROM genre_categories gc \
          WHERE gc.genre_id = g.id ORDER BY gc.category_id) AS categories_id";

#[derive(Clone)]
pub struct PgGenreRepository {
    pool: PgPool,
}

impl PgGenreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn conditions(filter: Option<&GenreFilter>) -> Vec<String> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;
        if let Some(filter) = filter {
            if filter.name.is_some() {
                conditions.push(format!("strpos(lower(g.name), lower(${bind_idx})) > 0"));
                bind_idx += 1;
            }
            if filter.categories_id.is_some() {
                conditions.push(format!(
                    "EXISTS (SELECT 1 FROM genre_categories gc \
                     WHERE gc.genre_id = g.id AND gc.category_id = ANY(${bind_idx}))"
                ));
            }
        }
        conditions
    }

    /// Replace the category links of one genre. Runs inside the caller's
    /// transaction.
    async fn set_categories_inner(
        tx: &mut Transaction<'_, Postgres>,
        genre: &Genre,
    ) -> Result<(), sqlx::Error> {
        let genre_id = *genre.genre_id().as_uuid();
        let category_ids: Vec<Uuid> = genre.categories_id().iter().map(|id| *id.as_uuid()).collect();

        sqlx::query("DELETE FROM genre_categories WHERE genre_id = $1")
            .bind(genre_id)
            .execute(&mut **tx)
            .await?;

        sqlx::query(
            "INSERT INTO genre_categories (genre_id, category_id) \
             SELECT $1, UNNEST($2::uuid[])",
        )
        .bind(genre_id)
        .bind(&category_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl Repository<Genre> for PgGenreRepository {
    async fn insert(&self, entity: &Genre) -> Result<(), CoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query(
            "INSERT INTO genres (id, name, is_active, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(*entity.genre_id().as_uuid())
        .bind(entity.name())
        .bind(entity.is_active())
        .bind(entity.created_at())
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        Self::set_categories_inner(&mut tx, entity)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn bulk_insert(&self, entities: &[Genre]) -> Result<(), CoreError> {
        if entities.is_empty() {
            return Ok(());
        }
        let ids: Vec<Uuid> = entities.iter().map(|g| *g.genre_id().as_uuid()).collect();
        let names: Vec<&str> = entities.iter().map(Genre::name).collect();
        let actives: Vec<bool> = entities.iter().map(Genre::is_active).collect();
        let created: Vec<_> = entities.iter().map(Genre::created_at).collect();

        let (link_genres, link_categories): (Vec<Uuid>, Vec<Uuid>) = entities
            .iter()
            .flat_map(|g| {
                let genre_id = *g.genre_id().as_uuid();
                g.categories_id().iter().map(move |c| (genre_id, *c.as_uuid()))
            })
            .unzip();

        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query(
            "INSERT INTO genres (id, name, is_active, created_at) \
             SELECT * FROM UNNEST($1::uuid[], $2::varchar[], $3::bool[], $4::timestamptz[])",
        )
        .bind(&ids)
        .bind(&names)
        .bind(&actives)
        .bind(&created)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        sqlx::query(
            "INSERT INTO genre_categories (genre_id, category_id) \
             SELECT * FROM UNNEST($1::uuid[], $2::uuid[])",
        )
        .bind(&link_genres)
        .bind(&link_categories)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &GenreId) -> Result<Option<Genre>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM genres g WHERE g.id = $1");
        let row = sqlx::query_as::<_, GenreRow>(&query)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(row.map(Genre::from))
    }

    async fn find_all(&self) -> Result<Vec<Genre>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM genres g ORDER BY g.created_at");
        let rows = sqlx::query_as::<_, GenreRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Genre::from).collect())
    }

    async fn update(&self, entity: &Genre) -> Result<(), CoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let result = sqlx::query("UPDATE genres SET name = $2, is_active = $3 WHERE id = $1")
            .bind(*entity.genre_id().as_uuid())
            .bind(entity.name())
            .bind(entity.is_active())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found(Genre::NAME, entity.genre_id()));
        }

        Self::set_categories_inner(&mut tx, entity)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn delete(&self, id: &GenreId) -> Result<(), CoreError> {
        // Links go with the genre via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found(Genre::NAME, id));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<Genre, GenreFilter> for PgGenreRepository {
    fn sortable_fields(&self) -> &'static [&'static str] {
        GENRE_SORTABLE_FIELDS
    }

    async fn search(
        &self,
        params: &SearchParams<GenreFilter>,
    ) -> Result<SearchResult<Genre>, CoreError> {
        let filter = params.filter();
        let conditions = Self::conditions(filter);
        let where_clause = where_clause(&conditions);
        let bind_idx = conditions.len() + 1;
        let name = filter.and_then(|f| f.name.as_deref());
        let category_ids: Option<Vec<Uuid>> = filter
            .and_then(|f| f.categories_id.as_ref())
            .map(|ids| ids.iter().map(|id| *id.as_uuid()).collect());

        let count_query = format!("SELECT COUNT(*) FROM genres g {where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(name) = name {
            count = count.bind(name);
        }
        if let Some(ref ids) = category_ids {
            count = count.bind(ids);
        }
        let total = count.fetch_one(&self.pool).await.map_err(db_error)?;

        let query = format!(
            "SELECT {COLUMNS} FROM genres g {where_clause} {order} \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            order = order_by(params, GENRE_SORTABLE_FIELDS, "g."),
            next_idx = bind_idx + 1,
        );
        let (limit, offset) = limit_offset(params);
        let mut q = sqlx::query_as::<_, GenreRow>(&query);
        if let Some(name) = name {
            q = q.bind(name);
        }
        if let Some(ref ids) = category_ids {
            q = q.bind(ids);
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
            "Searched genres"
        );

        Ok(SearchResult::new(
            rows.into_iter().map(Genre::from).collect(),
            u64::try_from(total).unwrap_or_default(),
            params.page(),
            params.per_page(),
        ))
    }
}
