//! Catalog domain: aggregates, search engine, repository contracts and use
//! cases. Free of database and HTTP dependencies.

pub mod cast_member;
pub mod category;
pub mod entity;
pub mod error;
pub mod genre;
pub mod identifier;
pub mod memory;
pub mod notification;
pub mod repository;
pub mod search;
pub mod types;
pub mod use_case;
pub mod validation;
