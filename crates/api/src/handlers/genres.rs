//! Handlers for the `/genres` resource.
//!
//! Create and update also consult the category repository to verify that
//! every referenced category exists.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::genre::use_cases::{
    CreateGenreInput, CreateGenreUseCase, DeleteGenreInput, DeleteGenreUseCase, GetGenreInput,
    GetGenreUseCase, ListGenresUseCase, UpdateGenreInput, UpdateGenreUseCase,
};
use catalog_core::use_case::UseCase;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::query::ListQuery;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// GET /api/v1/genres?filter[name]=&filter[categories_id]=
pub async fn list(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    let input = ListQuery::new(pairs).genre_input()?;
    let output = ListGenresUseCase::new(state.genres).execute(input).await?;
    Ok(Json(ListResponse::from(output)))
}

/// POST /api/v1/genres
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateGenreInput>,
) -> AppResult<impl IntoResponse> {
    let output = CreateGenreUseCase::new(state.genres, state.categories)
        .execute(input)
        .await?;
    tracing::info!(
        id = %output.id,
        categories = output.categories_id.len(),
        "Genre created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: output })))
}

/// GET /api/v1/genres/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let output = GetGenreUseCase::new(state.genres)
        .execute(GetGenreInput { id })
        .await?;
    Ok(Json(DataResponse { data: output }))
}

/// PUT|PATCH /api/v1/genres/{id}
///
/// A supplied `categories_id` replaces the whole set.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(mut input): AppJson<UpdateGenreInput>,
) -> AppResult<impl IntoResponse> {
    input.id = id;
    let output = UpdateGenreUseCase::new(state.genres, state.categories)
        .execute(input)
        .await?;
    tracing::info!(id = %output.id, "Genre updated");
    Ok(Json(DataResponse { data: output }))
}

/// DELETE /api/v1/genres/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    DeleteGenreUseCase::new(state.genres)
        .execute(DeleteGenreInput { id: id.clone() })
        .await?;
    tracing::info!(%id, "Genre deleted");
    Ok(StatusCode::NO_CONTENT)
}
