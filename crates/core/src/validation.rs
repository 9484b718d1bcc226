//! Explicit field rules shared by the entity validators, plus the bridge from
//! `validator` derive errors on use-case inputs to [`CoreError::InvalidInput`].

use validator::Validate;

use crate::error::CoreError;
use crate::notification::Notification;

/// Default maximum length of name fields.
pub const MAX_NAME_CHARS: usize = 255;

/// Ordered `(field, message)` pairs produced by an entity validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Add every error to `notification` (deduplicated by the notification).
    pub fn record(&self, notification: &mut Notification) {
        for (field, message) in &self.0 {
            notification.add_error(message.clone(), Some(field));
        }
    }

    /// `Ok` when empty, otherwise an [`CoreError::EntityValidation`].
    ///
    /// Used at construction time, where no entity exists yet to hold a
    /// notification.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            return Ok(());
        }
        let mut notification = Notification::new();
        self.record(&mut notification);
        Err(CoreError::EntityValidation(notification))
    }
}

/// `value` must contain at least one non-whitespace character.
pub fn not_blank(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, format!("{field} must not be empty"));
    }
}

/// `value` must be at most `max` characters (not bytes).
pub fn max_chars(errors: &mut FieldErrors, field: &'static str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(field, format!("{field} must be at most {max} characters"));
    }
}

/// A collection field must hold at least `min` items.
pub fn min_items(errors: &mut FieldErrors, field: &'static str, len: usize, min: usize) {
    if len < min {
        let noun = if min == 1 { "item" } else { "items" };
        errors.push(field, format!("{field} must contain at least {min} {noun}"));
    }
}

/// Run `validator` rules on a use-case input, mapping failures to
/// [`CoreError::InvalidInput`] with one entry per offending field.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    ensure_valid_input(input_errors(input))
}

/// `validator` failures of `input` as a notification, fields sorted by name.
pub fn input_errors<T: Validate>(input: &T) -> Notification {
    let mut notification = Notification::new();
    let Err(errors) = input.validate() else {
        return notification;
    };

    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, field_errors) in fields {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid ({})", error.code));
            notification.add_error(message, Some(field.as_ref()));
        }
    }
    notification
}

/// `Ok` for an empty notification, otherwise [`CoreError::InvalidInput`].
pub fn ensure_valid_input(notification: Notification) -> Result<(), CoreError> {
    if notification.has_errors() {
        return Err(CoreError::InvalidInput(notification));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use validator::Validate;

    use super::*;

    #[test]
    fn not_blank_rejects_whitespace() {
        let mut errors = FieldErrors::new();
        not_blank(&mut errors, "name", "   ");
        not_blank(&mut errors, "other", "x");
        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            [("name", "name must not be empty")]
        );
    }

    #[test]
    fn max_chars_counts_characters_not_bytes() {
        let mut errors = FieldErrors::new();
        max_chars(&mut errors, "name", &"é".repeat(255), 255);
        assert!(errors.is_empty());

        max_chars(&mut errors, "name", &"a".repeat(256), 255);
        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            [("name", "name must be at most 255 characters")]
        );
    }

    #[test]
    fn min_items_message() {
        let mut errors = FieldErrors::new();
        min_items(&mut errors, "categories_id", 0, 1);
        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            [("categories_id", "categories_id must contain at least 1 item")]
        );
    }

    #[test]
    fn into_result_wraps_errors_in_entity_validation() {
        let mut errors = FieldErrors::new();
        errors.push("name", "bad");
        let err = errors.into_result().unwrap_err();
        assert_matches!(err, CoreError::EntityValidation(n) if n.field_errors("name") == ["bad"]);
    }

    #[derive(Validate)]
    struct Input {
        #[validate(length(min = 1, message = "name must not be empty"))]
        name: String,
        #[validate(length(min = 1))]
        tags: Vec<String>,
    }

    #[test]
    fn validate_input_maps_field_errors() {
        let input = Input {
            name: String::new(),
            tags: vec![],
        };
        let err = validate_input(&input).unwrap_err();
        assert_matches!(err, CoreError::InvalidInput(n) => {
            assert_eq!(n.fields().collect::<Vec<_>>(), ["name", "tags"]);
            assert_eq!(n.field_errors("name"), ["name must not be empty"]);
            assert_eq!(n.field_errors("tags"), ["tags is invalid (length)"]);
        });
    }

    #[test]
    fn validate_input_passes_valid_input() {
        let input = Input {
            name: "ok".into(),
            tags: vec!["a".into()],
        };
        assert!(validate_input(&input).is_ok());
    }
}
