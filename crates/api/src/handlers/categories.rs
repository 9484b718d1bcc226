//! Handlers for the `/categories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::category::use_cases::{
    CreateCategoryInput, CreateCategoryUseCase, DeleteCategoryInput, DeleteCategoryUseCase,
    GetCategoryInput, GetCategoryUseCase, ListCategoriesUseCase, UpdateCategoryInput,
    UpdateCategoryUseCase,
};
use catalog_core::use_case::UseCase;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::query::ListQuery;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// GET /api/v1/categories?page=&per_page=&sort=&sort_dir=&filter=
pub async fn list(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    let input = ListQuery::new(pairs).category_input();
    let output = ListCategoriesUseCase::new(state.categories).execute(input).await?;
    Ok(Json(ListResponse::from(output)))
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCategoryInput>,
) -> AppResult<impl IntoResponse> {
    let output = CreateCategoryUseCase::new(state.categories).execute(input).await?;
    tracing::info!(id = %output.id, name = %output.name, "Category created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: output })))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let output = GetCategoryUseCase::new(state.categories)
        .execute(GetCategoryInput { id })
        .await?;
    Ok(Json(DataResponse { data: output }))
}

/// PUT|PATCH /api/v1/categories/{id}
///
/// Only fields present in the body are changed.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(mut input): AppJson<UpdateCategoryInput>,
) -> AppResult<impl IntoResponse> {
    input.id = id;
    let output = UpdateCategoryUseCase::new(state.categories).execute(input).await?;
    tracing::info!(id = %output.id, "Category updated");
    Ok(Json(DataResponse { data: output }))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    DeleteCategoryUseCase::new(state.categories)
        .execute(DeleteCategoryInput { id: id.clone() })
        .await?;
    tracing::info!(%id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
