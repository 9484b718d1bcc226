//! Storage contracts for aggregates.
//!
//! Use cases only see these traits. Implementations live in
//! [`crate::memory`] (process-local) and in the `catalog-db` crate
//! (PostgreSQL).

use async_trait::async_trait;

use crate::entity::Entity;
use crate::error::CoreError;
use crate::search::{SearchFilter, SearchParams, SearchResult};

/// Basic persistence for one entity type.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Persist a new entity.
    async fn insert(&self, entity: &E) -> Result<(), CoreError>;

    /// Persist many entities at once.
    async fn bulk_insert(&self, entities: &[E]) -> Result<(), CoreError>;

    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, CoreError>;

    async fn find_all(&self) -> Result<Vec<E>, CoreError>;

    /// Replace the stored state of an existing entity.
    /// Fails with [`CoreError::NotFound`] if the id is unknown.
    async fn update(&self, entity: &E) -> Result<(), CoreError>;

    /// Fails with [`CoreError::NotFound`] if the id is unknown.
    async fn delete(&self, id: &E::Id) -> Result<(), CoreError>;
}

/// A repository that can filter, sort and paginate.
#[async_trait]
pub trait SearchableRepository<E, F>: Repository<E>
where
    E: Entity,
    F: SearchFilter,
{
    /// Field names accepted as sort keys. Other sort values are ignored.
    fn sortable_fields(&self) -> &'static [&'static str];

    async fn search(&self, params: &SearchParams<F>) -> Result<SearchResult<E>, CoreError>;
}
