use core::cmp::Ordering;

use crate::category::Category;
use crate::memory::{contains_ignore_case, InMemoryRepository, SearchSpec};
use crate::repository::SearchableRepository;

/// Free-text filter: case-insensitive substring of the name.
pub type CategoryFilter = String;

pub const CATEGORY_SORTABLE_FIELDS: &[&str] = &["name", "created_at"];

pub trait CategoryRepository: SearchableRepository<Category, CategoryFilter> {}

impl<T> CategoryRepository for T where T: SearchableRepository<Category, CategoryFilter> {}

pub struct CategorySearch;

impl SearchSpec for CategorySearch {
    type Item = Category;
    type Filter = CategoryFilter;

    const SORTABLE_FIELDS: &'static [&'static str] = CATEGORY_SORTABLE_FIELDS;

    fn matches(item: &Category, filter: &CategoryFilter) -> bool {
        contains_ignore_case(item.name(), filter)
    }

    fn compare(a: &Category, b: &Category, field: &str) -> Ordering {
        match field {
            "name" => a.name().cmp(b.name()),
            _ => a.created_at().cmp(&b.created_at()),
        }
    }
}

pub type CategoryInMemoryRepository = InMemoryRepository<CategorySearch>;
