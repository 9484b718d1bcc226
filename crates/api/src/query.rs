//! Query-string parsing for list endpoints.
//!
//! List endpoints accept `page`, `per_page`, `sort`, `sort_dir` and
//! `filter`. Structured filters may come as bracketed keys
//! (`filter[name]=x&filter[type]=1`, `filter[categories_id]=a,b`,
//! `filter[categories_id][]=a`) or as a JSON object in `filter`.
//! Paging and sorting values are passed through untouched; the core
//! normalises them.

use std::collections::BTreeSet;

use catalog_core::cast_member::{CastMemberFilter, CastMemberType};
use catalog_core::error::CoreError;
use catalog_core::genre::GenreFilter;
use catalog_core::identifier::CategoryId;
use catalog_core::notification::Notification;
use catalog_core::search::SearchInput;
use catalog_core::validation::ensure_valid_input;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Raw `key=value` pairs from the query string, in order.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pairs: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Last value given for `key`.
    fn last(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn all<'a>(&'a self, keys: &'a [&'a str]) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| keys.contains(&k.as_str()))
            .map(|(_, v)| v.as_str())
    }

    fn has_nested_filter(&self) -> bool {
        self.pairs.iter().any(|(k, _)| k.starts_with("filter["))
    }

    fn search_input<R>(&self, filter: Option<R>) -> SearchInput<R> {
        let raw = |key: &str| self.last(key).map(|v| Value::String(v.to_string()));
        SearchInput {
            page: raw("page"),
            per_page: raw("per_page"),
            sort: raw("sort"),
            sort_dir: raw("sort_dir"),
            filter,
        }
    }

    /// Parse `filter` as a JSON object for structured filters.
    fn json_filter<R: DeserializeOwned>(&self) -> Result<Option<R>, CoreError> {
        match self.last("filter") {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => serde_json::from_str(raw).map(Some).map_err(|err| {
                CoreError::invalid_field("filter", format!("filter must be a JSON object: {err}"))
            }),
        }
    }

    /// Category list input. The free-text filter is the plain `filter` value.
    pub fn category_input(&self) -> SearchInput<Value> {
        let filter = self.last("filter").map(|v| Value::String(v.to_string()));
        self.search_input(filter)
    }

    pub fn cast_member_input(&self) -> Result<SearchInput<CastMemberFilter>, CoreError> {
        if !self.has_nested_filter() {
            return Ok(self.search_input(self.json_filter()?));
        }

        let mut errors = Notification::new();
        let cast_member_type = self
            .last("filter[type]")
            .filter(|v| !v.trim().is_empty())
            .and_then(|v| match parse_type(v) {
                Some(t) => Some(t),
                None => {
                    errors.add_error(
                        format!("filter[type] must be 1 (director) or 2 (actor), got {v}"),
                        Some("filter[type]"),
                    );
                    None
                }
            });
        ensure_valid_input(errors)?;

        let filter = CastMemberFilter {
            name: self.last("filter[name]").map(str::to_string),
            cast_member_type,
        };
        Ok(self.search_input(Some(filter)))
    }

    pub fn genre_input(&self) -> Result<SearchInput<GenreFilter>, CoreError> {
        if !self.has_nested_filter() {
            return Ok(self.search_input(self.json_filter()?));
        }

        let mut errors = Notification::new();
        let mut ids = BTreeSet::new();
        let raw_ids = self
            .all(&["filter[categories_id]", "filter[categories_id][]"])
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|v| !v.is_empty());
        for raw in raw_ids {
            match raw.parse::<CategoryId>() {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(err) => errors.add_error(err.to_string(), Some("filter[categories_id]")),
            }
        }
        ensure_valid_input(errors)?;

        let filter = GenreFilter {
            name: self.last("filter[name]").map(str::to_string),
            categories_id: (!ids.is_empty()).then_some(ids),
        };
        Ok(self.search_input(Some(filter)))
    }
}

fn parse_type(raw: &str) -> Option<CastMemberType> {
    raw.trim()
        .parse::<i16>()
        .ok()
        .and_then(|code| CastMemberType::try_from(code).ok())
}
