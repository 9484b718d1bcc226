use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::category::{Category, CategoryFilter, CategoryProps, CategoryRepository};
use crate::entity::Entity;
use crate::error::CoreError;
use crate::identifier::CategoryId;
use crate::search::{SearchInput, SearchParams};
use crate::types::{now, Timestamp};
use crate::use_case::{deserialize_present, parse_input_id, PaginationOutput, UseCase};
use crate::validation::{ensure_valid_input, input_errors, validate_input};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOutput {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<&Category> for CategoryOutput {
    fn from(category: &Category) -> Self {
        Self {
            id: category.category_id(),
            name: category.name().to_string(),
            description: category.description().map(str::to_string),
            is_active: category.is_active(),
            created_at: category.created_at(),
        }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryInput {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CreateCategoryInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_active: true,
        }
    }
}

pub struct CreateCategoryUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl CreateCategoryUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for CreateCategoryUseCase {
    type Input = CreateCategoryInput;
    type Output = CategoryOutput;

    async fn execute(&self, input: CreateCategoryInput) -> Result<CategoryOutput, CoreError> {
        validate_input(&input)?;
        let category = Category::new(CategoryProps {
            category_id: CategoryId::new(),
            name: input.name,
            description: input.description,
            is_active: input.is_active,
            created_at: now(),
        })?;
        self.repo.insert(&category).await?;
        Ok(CategoryOutput::from(&category))
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct GetCategoryInput {
    pub id: String,
}

pub struct GetCategoryUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl GetCategoryUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for GetCategoryUseCase {
    type Input = GetCategoryInput;
    type Output = CategoryOutput;

    async fn execute(&self, input: GetCategoryInput) -> Result<CategoryOutput, CoreError> {
        let id: CategoryId = parse_input_id(&input.id)?;
        let category = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CoreError::not_found(Category::NAME, id))?;
        Ok(CategoryOutput::from(&category))
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// Raw pagination values plus a free-text filter.
pub type ListCategoriesInput = SearchInput<Value>;

pub struct ListCategoriesUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl ListCategoriesUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for ListCategoriesUseCase {
    type Input = ListCategoriesInput;
    type Output = PaginationOutput<CategoryOutput>;

    async fn execute(
        &self,
        input: ListCategoriesInput,
    ) -> Result<PaginationOutput<CategoryOutput>, CoreError> {
        let params = SearchParams::<CategoryFilter>::new(input);
        let result = self.repo.search(&params).await?;
        Ok(PaginationOutput::from_search_result(result, |category| {
            CategoryOutput::from(&category)
        }))
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Partial update. `None` leaves a field untouched. For `description`,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategoryInput {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl UpdateCategoryInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), CoreError> {
        let mut errors = input_errors(self);
        if matches!(&self.description, Some(Some(d)) if d.is_empty()) {
            errors.add_error("description must not be empty", Some("description"));
        }
        ensure_valid_input(errors)
    }
}

pub struct UpdateCategoryUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl UpdateCategoryUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for UpdateCategoryUseCase {
    type Input = UpdateCategoryInput;
    type Output = CategoryOutput;

    async fn execute(&self, input: UpdateCategoryInput) -> Result<CategoryOutput, CoreError> {
        let id: CategoryId = parse_input_id(&input.id)?;
        input.check()?;

        let mut category = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CoreError::not_found(Category::NAME, id))?;

        if let Some(name) = input.name {
            category.change_name(name);
        }
        if let Some(description) = input.description {
            category.change_description(description);
        }
        match input.is_active {
            Some(true) => category.activate(),
            Some(false) => category.deactivate(),
            None => {}
        }

        if category.notification().has_errors() {
            return Err(CoreError::EntityValidation(category.notification().clone()));
        }

        self.repo.update(&category).await?;
        Ok(CategoryOutput::from(&category))
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteCategoryInput {
    pub id: String,
}

pub struct DeleteCategoryUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl DeleteCategoryUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for DeleteCategoryUseCase {
    type Input = DeleteCategoryInput;
    type Output = ();

    async fn execute(&self, input: DeleteCategoryInput) -> Result<(), CoreError> {
        let id: CategoryId = parse_input_id(&input.id)?;
        self.repo.delete(&id).await
    }
}
