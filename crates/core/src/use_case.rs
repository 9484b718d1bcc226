//! Shared use-case plumbing: the [`UseCase`] seam, list output envelope and
//! input helpers.

use core::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::notification::Notification;
use crate::search::SearchResult;

/// One application operation. Inputs are validated inside `execute`, before
/// any repository call.
#[async_trait]
pub trait UseCase: Send + Sync {
    type Input: Send;
    type Output;

    async fn execute(&self, input: Self::Input) -> Result<Self::Output, CoreError>;
}

/// Paginated list output, mirroring [`SearchResult`] with mapped items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationOutput<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub current_page: u64,
    pub per_page: u64,
    pub last_page: u64,
}

impl<T> PaginationOutput<T> {
    pub fn from_search_result<E>(result: SearchResult<E>, f: impl FnMut(E) -> T) -> Self {
        let result = result.map(f);
        Self {
            items: result.items,
            total: result.total,
            current_page: result.current_page,
            per_page: result.per_page,
            last_page: result.last_page,
        }
    }
}

/// Parse an id string, recording the failure under `field` instead of
/// returning it.
pub fn parse_id_into<I>(raw: &str, field: &str, errors: &mut Notification) -> Option<I>
where
    I: FromStr<Err = CoreError>,
{
    match raw.parse() {
        Ok(id) => Some(id),
        Err(err) => {
            errors.add_error(err.to_string(), Some(field));
            None
        }
    }
}

/// Parse the `id` of a Get/Update/Delete input.
pub fn parse_input_id<I>(raw: &str) -> Result<I, CoreError>
where
    I: FromStr<Err = CoreError>,
{
    raw.parse()
        .map_err(|err: CoreError| CoreError::invalid_field("id", err.to_string()))
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) when used with `#[serde(default)]` on an
/// `Option<Option<T>>`.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
