use crate::notification::Notification;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("ID {0} must be a valid UUID")]
    InvalidIdentifier(String),

    /// Business-rule violations accumulated on an entity's notification.
    #[error("Entity validation failed: {0}")]
    EntityValidation(Notification),

    /// Structurally invalid input (missing fields, wrong shapes, bad ids),
    /// rejected before any use case touches a repository.
    #[error("Invalid input: {0}")]
    InvalidInput(Notification),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Not-found error naming several missing ids, joined with `", "`.
    pub fn not_found_many<I, T>(entity: &'static str, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let id = ids
            .into_iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        CoreError::NotFound { entity, id }
    }

    /// Input error carrying a single message for a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut notification = Notification::default();
        notification.add_error(message, Some(field));
        CoreError::InvalidInput(notification)
    }
}
