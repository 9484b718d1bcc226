//! Handlers for the `/cast-members` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::cast_member::use_cases::{
    CreateCastMemberInput, CreateCastMemberUseCase, DeleteCastMemberInput,
    DeleteCastMemberUseCase, GetCastMemberInput, GetCastMemberUseCase, ListCastMembersUseCase,
    UpdateCastMemberInput, UpdateCastMemberUseCase,
};
use catalog_core::use_case::UseCase;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::query::ListQuery;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// GET /api/v1/cast-members?filter[name]=&filter[type]=
pub async fn list(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    let input = ListQuery::new(pairs).cast_member_input()?;
    let output = ListCastMembersUseCase::new(state.cast_members)
        .execute(input)
        .await?;
    Ok(Json(ListResponse::from(output)))
}

/// POST /api/v1/cast-members
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCastMemberInput>,
) -> AppResult<impl IntoResponse> {
    let output = CreateCastMemberUseCase::new(state.cast_members)
        .execute(input)
        .await?;
    tracing::info!(
        id = %output.id,
        cast_member_type = %output.cast_member_type,
        "Cast member created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: output })))
}

/// GET /api/v1/cast-members/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let output = GetCastMemberUseCase::new(state.cast_members)
        .execute(GetCastMemberInput { id })
        .await?;
    Ok(Json(DataResponse { data: output }))
}

/// PUT|PATCH /api/v1/cast-members/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(mut input): AppJson<UpdateCastMemberInput>,
) -> AppResult<impl IntoResponse> {
    input.id = id;
    let output = UpdateCastMemberUseCase::new(state.cast_members)
        .execute(input)
        .await?;
    tracing::info!(id = %output.id, "Cast member updated");
    Ok(Json(DataResponse { data: output }))
}

/// DELETE /api/v1/cast-members/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    DeleteCastMemberUseCase::new(state.cast_members)
        .execute(DeleteCastMemberInput { id: id.clone() })
        .await?;
    tracing::info!(%id, "Cast member deleted");
    Ok(StatusCode::NO_CONTENT)
}
