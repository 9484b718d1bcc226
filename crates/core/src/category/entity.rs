use crate::entity::{AggregateRoot, Entity};
use crate::error::CoreError;
use crate::identifier::CategoryId;
use crate::impl_entity_eq;
use crate::notification::Notification;
use crate::types::{now, Timestamp};
use crate::validation::{self, FieldErrors, MAX_NAME_CHARS};

/// Construction data for a [`Category`].
#[derive(Debug, Clone)]
pub struct CategoryProps {
    pub category_id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl CategoryProps {
    /// Fresh id, no description, active, stamped now.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            category_id: CategoryId::new(),
            name: name.into(),
            description: None,
            is_active: true,
            created_at: now(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    category_id: CategoryId,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: Timestamp,
    notification: Notification,
}

impl_entity_eq!(Category);

impl Category {
    /// Build a category, failing with [`CoreError::EntityValidation`] if
    /// any rule is violated.
    pub fn new(props: CategoryProps) -> Result<Self, CoreError> {
        rules(&props.name).into_result()?;
        Ok(Self::restore(props))
    }

    /// Rehydrate persisted state without re-running the rules.
    pub fn restore(props: CategoryProps) -> Self {
        Self {
            category_id: props.category_id,
            name: props.name,
            description: props.description,
            is_active: props.is_active,
            created_at: props.created_at,
            notification: Notification::new(),
        }
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn change_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.validate();
    }

    pub fn change_description(&mut self, description: Option<String>) {
        self.description = description;
        self.validate();
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

fn rules(name: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    validation::not_blank(&mut errors, "name", name);
    validation::max_chars(&mut errors, "name", name, MAX_NAME_CHARS);
    errors
}

impl Entity for Category {
    type Id = CategoryId;
    const NAME: &'static str = "Category";

    fn entity_id(&self) -> &CategoryId {
        &self.category_id
    }

    fn notification(&self) -> &Notification {
        &self.notification
    }

    fn validate(&mut self) {
        rules(&self.name).record(&mut self.notification);
    }
}

impl AggregateRoot for Category {}

#[cfg(test)]
impl Category {
    /// Valid category created `age_secs` seconds ago.
    pub(crate) fn fake(name: &str, age_secs: i64) -> Self {
        let mut props = CategoryProps::new(name);
        props.created_at = now() - chrono::Duration::seconds(age_secs);
        Self::new(props).expect("fake category is valid")
    }

    /// `count` categories named `"{prefix} 1"` onwards, oldest first, one
    /// second apart.
    pub(crate) fn fakes(prefix: &str, count: usize) -> Vec<Self> {
        (1..=count)
            .map(|i| Self::fake(&format!("{prefix} {i}"), (count + 1 - i) as i64))
            .collect()
    }
}
