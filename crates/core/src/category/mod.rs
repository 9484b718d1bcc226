//! Category aggregate: entity, search specialisation and use cases.

mod entity;
mod repository;
pub mod use_cases;

pub use entity::{Category, CategoryProps};
pub use repository::{
    CategoryFilter, CategoryInMemoryRepository, CategoryRepository, CategorySearch,
    CATEGORY_SORTABLE_FIELDS,
};
