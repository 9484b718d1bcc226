//! Genre aggregate. Genres reference categories by id.

mod entity;
mod repository;
pub mod use_cases;

pub use entity::{Genre, GenreProps};
pub use repository::{
    GenreFilter, GenreInMemoryRepository, GenreRepository, GenreSearch, GENRE_SORTABLE_FIELDS,
};
