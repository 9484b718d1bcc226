use core::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Deserialize;

use crate::genre::Genre;
use crate::identifier::CategoryId;
use crate::memory::{contains_ignore_case, InMemoryRepository, SearchSpec};
use crate::repository::SearchableRepository;
use crate::search::SearchFilter;

/// Structured genre filter. `categories_id` matches genres linked to at
/// least one of the given categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenreFilter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub categories_id: Option<BTreeSet<CategoryId>>,
}

impl GenreFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.categories_id.is_none()
    }

    pub fn matches(&self, item: &Genre) -> bool {
        let name_ok = self
            .name
            .as_deref()
            .map_or(true, |name| contains_ignore_case(item.name(), name));
        let categories_ok = self
            .categories_id
            .as_ref()
            .map_or(true, |ids| !ids.is_disjoint(item.categories_id()));
        name_ok && categories_ok
    }
}

impl SearchFilter for GenreFilter {
    type Raw = GenreFilter;

    fn normalize(mut raw: GenreFilter) -> Option<Self> {
        raw.name = raw.name.filter(|name| !name.is_empty());
        raw.categories_id = raw.categories_id.filter(|ids| !ids.is_empty());
        (!raw.is_empty()).then_some(raw)
    }
}

pub const GENRE_SORTABLE_FIELDS: &[&str] = &["name", "created_at"];

pub trait GenreRepository: SearchableRepository<Genre, GenreFilter> {}

impl<T> GenreRepository for T where T: SearchableRepository<Genre, GenreFilter> {}

pub struct GenreSearch;

impl SearchSpec for GenreSearch {
    type Item = Genre;
    type Filter = GenreFilter;

    const SORTABLE_FIELDS: &'static [&'static str] = GENRE_SORTABLE_FIELDS;

    fn matches(item: &Genre, filter: &GenreFilter) -> bool {
        filter.matches(item)
    }

    fn compare(a: &Genre, b: &Genre, field: &str) -> Ordering {
        match field {
            "name" => a.name().cmp(b.name()),
            _ => a.created_at().cmp(&b.created_at()),
        }
    }
}

pub type GenreInMemoryRepository = InMemoryRepository<GenreSearch>;
