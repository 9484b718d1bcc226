//! Route definitions for `/cast-members`.

use axum::routing::get;
use axum::Router;

use crate::handlers::cast_members;
use crate::state::AppState;

/// Routes mounted at `/cast-members`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cast_members::list).post(cast_members::create))
        .route(
            "/{id}",
            get(cast_members::get_by_id)
                .put(cast_members::update)
                .patch(cast_members::update)
                .delete(cast_members::delete),
        )
}
