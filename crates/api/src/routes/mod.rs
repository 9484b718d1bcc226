pub mod cast_members;
pub mod categories;
pub mod genres;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /categories            list, create
/// /categories/{id}       get, update (PUT/PATCH), delete
/// /cast-members          list, create
/// /cast-members/{id}     get, update (PUT/PATCH), delete
/// /genres                list, create
/// /genres/{id}           get, update (PUT/PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/cast-members", cast_members::router())
        .nest("/genres", genres::router())
}
