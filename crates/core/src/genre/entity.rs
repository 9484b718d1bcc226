use std::collections::BTreeSet;

use crate::entity::{AggregateRoot, Entity};
use crate::error::CoreError;
use crate::identifier::{CategoryId, GenreId};
use crate::impl_entity_eq;
use crate::notification::Notification;
use crate::types::{now, Timestamp};
use crate::validation::{self, FieldErrors, MAX_NAME_CHARS};

#[derive(Debug, Clone)]
pub struct GenreProps {
    pub genre_id: GenreId,
    pub name: String,
    pub categories_id: BTreeSet<CategoryId>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl GenreProps {
    pub fn new(name: impl Into<String>, categories_id: impl IntoIterator<Item = CategoryId>) -> Self {
        Self {
            genre_id: GenreId::new(),
            name: name.into(),
            categories_id: categories_id.into_iter().collect(),
            is_active: true,
            created_at: now(),
        }
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// A genre groups one or more categories.
#[derive(Debug, Clone)]
pub struct Genre {
    genre_id: GenreId,
    name: String,
    categories_id: BTreeSet<CategoryId>,
    is_active: bool,
    created_at: Timestamp,
    notification: Notification,
}

impl_entity_eq!(Genre);

impl Genre {
    pub fn new(props: GenreProps) -> Result<Self, CoreError> {
        rules(&props.name, &props.categories_id).into_result()?;
        Ok(Self::restore(props))
    }

    /// Rehydrate persisted state without re-running the rules.
    pub fn restore(props: GenreProps) -> Self {
        Self {
            genre_id: props.genre_id,
            name: props.name,
            categories_id: props.categories_id,
            is_active: props.is_active,
            created_at: props.created_at,
            notification: Notification::new(),
        }
    }

    pub fn genre_id(&self) -> GenreId {
        self.genre_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn categories_id(&self) -> &BTreeSet<CategoryId> {
        &self.categories_id
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

    pub fn add_category_id(&mut self, category_id: CategoryId) {
        self.categories_id.insert(category_id);
        self.validate();
    }

    pub fn remove_category_id(&mut self, category_id: &CategoryId) {
        self.categories_id.remove(category_id);
        self.validate();
    }

    pub fn sync_categories_id(&mut self, categories_id: impl IntoIterator<Item = CategoryId>) {
        self.categories_id = categories_id.into_iter().collect();
        self.validate();
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

fn rules(name: &str, categories_id: &BTreeSet<CategoryId>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    validation::not_blank(&mut errors, "name", name);
    validation::max_chars(&mut errors, "name", name, MAX_NAME_CHARS);
    validation::min_items(&mut errors, "categories_id", categories_id.len(), 1);
    errors
}

impl Entity for Genre {
    type Id = GenreId;
    const NAME: &'static str = "Genre";

    fn entity_id(&self) -> &GenreId {
        &self.genre_id
    }

    fn notification(&self) -> &Notification {
        &self.notification
    }

    fn validate(&mut self) {
        rules(&self.name, &self.categories_id).record(&mut self.notification);
    }
}

impl AggregateRoot for Genre {}

#[cfg(test)]
impl Genre {
    /// Valid genre linked to `categories_id`, created `age_secs` seconds ago.
    pub(crate) fn fake(name: &str, categories_id: &[CategoryId], age_secs: i64) -> Self {
        let mut props = GenreProps::new(name, categories_id.iter().copied());
        props.created_at = now() - chrono::Duration::seconds(age_secs);
        Self::new(props).expect("fake genre is valid")
    }

    /// `count` genres named `"{prefix} 1"` onwards, oldest first, one second
    /// apart, each linked to a fresh category.
    pub(crate) fn fakes(prefix: &str, count: usize) -> Vec<Self> {
        (1..=count)
            .map(|i| {
                Self::fake(
                    &format!("{prefix} {i}"),
                    &[CategoryId::new()],
                    (count + 1 - i) as i64,
                )
            })
            .collect()
    }
}
