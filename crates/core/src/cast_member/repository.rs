use core::cmp::Ordering;

use serde::Deserialize;

use crate::cast_member::{CastMember, CastMemberType};
use crate::memory::{contains_ignore_case, InMemoryRepository, SearchSpec};
use crate::repository::SearchableRepository;
use crate::search::SearchFilter;

/// Structured cast-member filter. Present fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CastMemberFilter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub cast_member_type: Option<CastMemberType>,
}

impl CastMemberFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cast_member_type.is_none()
    }

    pub fn matches(&self, item: &CastMember) -> bool {
        let name_ok = self
            .name
            .as_deref()
            .map_or(true, |name| contains_ignore_case(item.name(), name));
        let type_ok = self
            .cast_member_type
            .map_or(true, |t| item.cast_member_type() == t);
        name_ok && type_ok
    }
}

/// Empty names are dropped; a filter with nothing left is no filter.
impl SearchFilter for CastMemberFilter {
    type Raw = CastMemberFilter;

    fn normalize(mut raw: CastMemberFilter) -> Option<Self> {
        raw.name = raw.name.filter(|name| !name.is_empty());
        (!raw.is_empty()).then_some(raw)
    }
}

pub const CAST_MEMBER_SORTABLE_FIELDS: &[&str] = &["name", "created_at"];

pub trait CastMemberRepository: SearchableRepository<CastMember, CastMemberFilter> {}

impl<T> CastMemberRepository for T where T: SearchableRepository<CastMember, CastMemberFilter> {}

pub struct CastMemberSearch;

impl SearchSpec for CastMemberSearch {
    type Item = CastMember;
    type Filter = CastMemberFilter;

    const SORTABLE_FIELDS: &'static [&'static str] = CAST_MEMBER_SORTABLE_FIELDS;

    fn matches(item: &CastMember, filter: &CastMemberFilter) -> bool {
        filter.matches(item)
    }

    fn compare(a: &CastMember, b: &CastMember, field: &str) -> Ordering {
        match field {
            "name" => a.name().cmp(b.name()),
            _ => a.created_at().cmp(&b.created_at()),
        }
    }
}

pub type CastMemberInMemoryRepository = InMemoryRepository<CastMemberSearch>;
