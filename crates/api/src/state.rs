use std::sync::Arc;

use catalog_core::cast_member::{CastMemberInMemoryRepository, CastMemberRepository};
use catalog_core::category::{CategoryInMemoryRepository, CategoryRepository};
use catalog_core::genre::{GenreInMemoryRepository, GenreRepository};
use catalog_db::repositories::{PgCastMemberRepository, PgCategoryRepository, PgGenreRepository};
use catalog_db::DbPool;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable; repositories sit behind `Arc<dyn ...>` so handlers
/// never know which backend is active.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub categories: Arc<dyn CategoryRepository>,
    pub cast_members: Arc<dyn CastMemberRepository>,
    pub genres: Arc<dyn GenreRepository>,
    /// Present only for the PostgreSQL backend; used by `/health`.
    pub pool: Option<DbPool>,
}

impl AppState {
    /// State backed by process-local repositories.
    pub fn in_memory(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            categories: Arc::new(CategoryInMemoryRepository::new()),
            cast_members: Arc::new(CastMemberInMemoryRepository::new()),
            genres: Arc::new(GenreInMemoryRepository::new()),
            pool: None,
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(config: ServerConfig, pool: DbPool) -> Self {
        Self {
            config: Arc::new(config),
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            cast_members: Arc::new(PgCastMemberRepository::new(pool.clone())),
            genres: Arc::new(PgGenreRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }
}
