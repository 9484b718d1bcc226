use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::notification::Notification;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body could not be read as the expected JSON shape.
    #[error("Invalid body: {0}")]
    InvalidBody(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": format!("{entity} with id {id} not found") })),
            )
                .into_response(),

            AppError::Core(CoreError::EntityValidation(notification))
            | AppError::Core(CoreError::InvalidInput(notification)) => {
                unprocessable(&notification)
            }

            AppError::Core(CoreError::InvalidIdentifier(value)) => {
                let mut notification = Notification::new();
                notification.add_error(
                    CoreError::InvalidIdentifier(value).to_string(),
                    Some("id"),
                );
                unprocessable(&notification)
            }

            AppError::InvalidBody(reason) => {
                let mut notification = Notification::new();
                notification.add_error(reason, Some("body"));
                unprocessable(&notification)
            }

            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "An internal error occurred",
                        "code": "INTERNAL_ERROR",
                    })),
                )
                    .into_response()
            }
        }
    }
}

fn unprocessable(notification: &Notification) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(notification)).into_response()
}
