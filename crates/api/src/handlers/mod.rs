pub mod cast_members;
pub mod categories;
pub mod genres;
