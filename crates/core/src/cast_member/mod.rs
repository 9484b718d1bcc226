//! Cast member aggregate.

mod entity;
mod repository;
pub mod use_cases;

pub use entity::{CastMember, CastMemberProps, CastMemberType};
pub use repository::{
    CastMemberFilter, CastMemberInMemoryRepository, CastMemberRepository, CastMemberSearch,
    CAST_MEMBER_SORTABLE_FIELDS,
};
