use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::category::{Category, CategoryRepository};
use crate::entity::Entity;
use crate::error::CoreError;
use crate::genre::{Genre, GenreFilter, GenreProps, GenreRepository};
use crate::identifier::{CategoryId, GenreId};
use crate::notification::Notification;
use crate::search::{SearchInput, SearchParams};
use crate::types::{now, Timestamp};
use crate::use_case::{parse_id_into, parse_input_id, PaginationOutput, UseCase};
use crate::validation::{ensure_valid_input, input_errors};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreOutput {
    pub id: GenreId,
    pub name: String,
    pub categories_id: Vec<CategoryId>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<&Genre> for GenreOutput {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.genre_id(),
            name: genre.name().to_string(),
            categories_id: genre.categories_id().iter().copied().collect(),
            is_active: genre.is_active(),
            created_at: genre.created_at(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn parse_category_ids(raw: &[String], errors: &mut Notification) -> BTreeSet<CategoryId> {
    raw.iter()
        .filter_map(|id| parse_id_into(id, "categories_id", errors))
        .collect()
}

/// Every id must name a stored category; all missing ids are reported
/// together.
async fn ensure_categories_exist(
    repo: &dyn CategoryRepository,
    ids: &BTreeSet<CategoryId>,
) -> Result<(), CoreError> {
    let mut missing = Vec::new();
    for id in ids {
        if repo.find_by_id(id).await?.is_none() {
            missing.push(*id);
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::not_found_many(Category::NAME, missing))
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGenreInput {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "categories_id must contain at least 1 item"))]
    pub categories_id: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

pub struct CreateGenreUseCase {
    genre_repo: Arc<dyn GenreRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl CreateGenreUseCase {
    pub fn new(
        genre_repo: Arc<dyn GenreRepository>,
        category_repo: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            genre_repo,
            category_repo,
        }
    }
}

#[async_trait]
impl UseCase for CreateGenreUseCase {
    type Input = CreateGenreInput;
    type Output = GenreOutput;

    async fn execute(&self, input: CreateGenreInput) -> Result<GenreOutput, CoreError> {
        let mut errors = input_errors(&input);
        let categories_id = parse_category_ids(&input.categories_id, &mut errors);
        ensure_valid_input(errors)?;

        ensure_categories_exist(self.category_repo.as_ref(), &categories_id).await?;

        let genre = Genre::new(GenreProps {
            genre_id: GenreId::new(),
            name: input.name,
            categories_id,
            is_active: input.is_active,
            created_at: now(),
        })?;
        self.genre_repo.insert(&genre).await?;
        Ok(GenreOutput::from(&genre))
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct GetGenreInput {
    pub id: String,
}

pub struct GetGenreUseCase {
    repo: Arc<dyn GenreRepository>,
}

impl GetGenreUseCase {
    pub fn new(repo: Arc<dyn GenreRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for GetGenreUseCase {
    type Input = GetGenreInput;
    type Output = GenreOutput;

    async fn execute(&self, input: GetGenreInput) -> Result<GenreOutput, CoreError> {
        let id: GenreId = parse_input_id(&input.id)?;
        let genre = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CoreError::not_found(Genre::NAME, id))?;
        Ok(GenreOutput::from(&genre))
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

pub type ListGenresInput = SearchInput<GenreFilter>;

pub struct ListGenresUseCase {
    repo: Arc<dyn GenreRepository>,
}

impl ListGenresUseCase {
    pub fn new(repo: Arc<dyn GenreRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for ListGenresUseCase {
    type Input = ListGenresInput;
    type Output = PaginationOutput<GenreOutput>;

    async fn execute(
        &self,
        input: ListGenresInput,
    ) -> Result<PaginationOutput<GenreOutput>, CoreError> {
        let params = SearchParams::<GenreFilter>::new(input);
        let result = self.repo.search(&params).await?;
        Ok(PaginationOutput::from_search_result(result, |genre| {
            GenreOutput::from(&genre)
        }))
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Partial update. A supplied `categories_id` replaces the whole set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGenreInput {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "categories_id must contain at least 1 item"))]
    pub categories_id: Option<Vec<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl UpdateGenreInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

pub struct UpdateGenreUseCase {
    genre_repo: Arc<dyn GenreRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl UpdateGenreUseCase {
    pub fn new(
        genre_repo: Arc<dyn GenreRepository>,
        category_repo: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            genre_repo,
            category_repo,
        }
    }
}

#[async_trait]
impl UseCase for UpdateGenreUseCase {
    type Input = UpdateGenreInput;
    type Output = GenreOutput;

    async fn execute(&self, input: UpdateGenreInput) -> Result<GenreOutput, CoreError> {
        let id: GenreId = parse_input_id(&input.id)?;
        let mut errors = input_errors(&input);
        let categories_id = input
            .categories_id
            .as_deref()
            .map(|raw| parse_category_ids(raw, &mut errors));
        ensure_valid_input(errors)?;

        let mut genre = self
            .genre_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CoreError::not_found(Genre::NAME, id))?;

        if let Some(categories_id) = &categories_id {
            ensure_categories_exist(self.category_repo.as_ref(), categories_id).await?;
        }

        if let Some(name) = input.name {
            genre.change_name(name);
        }
        if let Some(categories_id) = categories_id {
            genre.sync_categories_id(categories_id);
        }
        match input.is_active {
            Some(true) => genre.activate(),
            Some(false) => genre.deactivate(),
            None => {}
        }

        if genre.notification().has_errors() {
            return Err(CoreError::EntityValidation(genre.notification().clone()));
        }

        self.genre_repo.update(&genre).await?;
        Ok(GenreOutput::from(&genre))
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteGenreInput {
    pub id: String,
}

pub struct DeleteGenreUseCase {
    repo: Arc<dyn GenreRepository>,
}

impl DeleteGenreUseCase {
    pub fn new(repo: Arc<dyn GenreRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for DeleteGenreUseCase {
    type Input = DeleteGenreInput;
    type Output = ();

    async fn execute(&self, input: DeleteGenreInput) -> Result<(), CoreError> {
        let id: GenreId = parse_input_id(&input.id)?;
        self.repo.delete(&id).await
    }
}
