//! Repository for the `cast_members` table.

use async_trait::async_trait;
use catalog_core::cast_member::{CastMember, CastMemberFilter, CAST_MEMBER_SORTABLE_FIELDS};
use catalog_core::entity::Entity;
use catalog_core::error::CoreError;
use catalog_core::identifier::CastMemberId;
use catalog_core::repository::{Repository, SearchableRepository};
use catalog_core::search::{SearchParams, SearchResult};
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use super::query::{limit_offset, order_by, where_clause};
use crate::models::cast_member::CastMemberRow;

/// Column list for the `cast_members` table.
const COLUMNS: &str = "id, name, type, created_at";

#[derive(Clone)]
pub struct PgCastMemberRepository {
    pool: PgPool,
}

impl PgCastMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// WHERE conditions for the filter, numbered from `$1` in field order
    /// (`name`, then `type`).
    fn conditions(filter: Option<&CastMemberFilter>) -> Vec<String> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;
        if let Some(filter) = filter {
            if filter.name.is_some() {
                conditions.push(format!("strpos(lower(name), lower(${bind_idx})) > 0"));
                bind_idx += 1;
            }
            if filter.cast_member_type.is_some() {
                conditions.push(format!("type = ${bind_idx}"));
            }
        }
        conditions
    }

    fn into_entities(rows: Vec<CastMemberRow>) -> Result<Vec<CastMember>, CoreError> {
        rows.into_iter().map(CastMember::try_from).collect()
    }
}

#[async_trait]
impl Repository<CastMember> for PgCastMemberRepository {
    async fn insert(&self, entity: &CastMember) -> Result<(), CoreError> {
        sqlx::query("INSERT INTO cast_members (id, name, type, created_at) VALUES ($1, $2, $3, $4)")
            .bind(*entity.cast_member_id().as_uuid())
            .bind(entity.name())
            .bind(entity.cast_member_type().code())
            .bind(entity.created_at())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn bulk_insert(&self, entities: &[CastMember]) -> Result<(), CoreError> {
        if entities.is_empty() {
            return Ok(());
        }
        let ids: Vec<Uuid> = entities.iter().map(|m| *m.cast_member_id().as_uuid()).collect();
        let names: Vec<&str> = entities.iter().map(CastMember::name).collect();
        let types: Vec<i16> = entities.iter().map(|m| m.cast_member_type().code()).collect();
        let created: Vec<_> = entities.iter().map(CastMember::created_at).collect();

        sqlx::query(
            "INSERT INTO cast_members (id, name, type, created_at) \
             SELECT * FROM UNNEST($1::uuid[], $2::varchar[], $3::smallint[], $4::timestamptz[])",
        )
        .bind(&ids)
        .bind(&names)
        .bind(&types)
        .bind(&created)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &CastMemberId) -> Result<Option<CastMember>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM cast_members WHERE id = $1");
        let row = sqlx::query_as::<_, CastMemberRow>(&query)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;
        row.map(CastMember::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<CastMember>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM cast_members ORDER BY created_at");
        let rows = sqlx::query_as::<_, CastMemberRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        Self::into_entities(rows)
    }

    async fn update(&self, entity: &CastMember) -> Result<(), CoreError> {
        let result = sqlx::query("UPDATE cast_members SET name = $2, type = $3 WHERE id = $1")
            .bind(*entity.cast_member_id().as_uuid())
            .bind(entity.name())
            .bind(entity.cast_member_type().code())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found(CastMember::NAME, entity.cast_member_id()));
        }
        Ok(())
    }

    async fn delete(&self, id: &CastMemberId) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM cast_members WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found(CastMember::NAME, id));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<CastMember, CastMemberFilter> for PgCastMemberRepository {
    fn sortable_fields(&self) -> &'static [&'static str] {
        CAST_MEMBER_SORTABLE_FIELDS
    }

    async fn search(
        &self,
        params: &SearchParams<CastMemberFilter>,
    ) -> Result<SearchResult<CastMember>, CoreError> {
        let filter = params.filter();
        let conditions = Self::conditions(filter);
        let where_clause = where_clause(&conditions);
        let bind_idx = conditions.len() + 1;
        let name = filter.and_then(|f| f.name.as_deref());
        let type_code = filter.and_then(|f| f.cast_member_type).map(|t| t.code());

        let count_query = format!("SELECT COUNT(*) FROM cast_members {where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(name) = name {
            count = count.bind(name);
        }
        if let Some(code) = type_code {
            count = count.bind(code);
        }
        let total = count.fetch_one(&self.pool).await.map_err(db_error)?;

        let query = format!(
            "SELECT {COLUMNS} FROM cast_members {where_clause} {order} \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            order = order_by(params, CAST_MEMBER_SORTABLE_FIELDS, ""),
            next_idx = bind_idx + 1,
        );
        let (limit, offset) = limit_offset(params);
        let mut q = sqlx::query_as::<_, CastMemberRow>(&query);
        if let Some(name) = name {
            q = q.bind(name);
        }
        if let Some(code) = type_code {
            q = q.bind(code);
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
            "Searched cast members"
        );

        Ok(SearchResult::new(
            Self::into_entities(rows)?,
            u64::try_from(total).unwrap_or_default(),
            params.page(),
            params.per_page(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::cast_member::CastMemberType;

    use super::*;

    #[test]
    fn conditions_are_numbered_in_field_order() {
        let filter = CastMemberFilter {
            name: Some("jo".into()),
            cast_member_type: Some(CastMemberType::Actor),
        };
        assert_eq!(
            PgCastMemberRepository::conditions(Some(&filter)),
            ["strpos(lower(name), lower($1)) > 0", "type = $2"]
        );

        let filter = CastMemberFilter {
            name: None,
            cast_member_type: Some(CastMemberType::Director),
        };
        assert_eq!(PgCastMemberRepository::conditions(Some(&filter)), ["type = $1"]);
        assert!(PgCastMemberRepository::conditions(None).is_empty());
    }
}
