//! Row structs and their mapping to domain aggregates.
//!
//! Each submodule contains a `FromRow` struct matching the table columns
//! and a `From` conversion into the core entity. Rows are trusted: they
//! were validated before they were written.

pub mod cast_member;
pub mod category;
pub mod genre;
