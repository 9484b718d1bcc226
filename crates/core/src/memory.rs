//! Process-local repository backend.
//!
//! [`InMemoryRepository`] is generic over a [`SearchSpec`] that supplies the
//! entity-specific parts (filter predicate, sortable fields, comparator).
//! Search runs filter, then sort, then paginate over a snapshot of the
//! stored items.

use core::cmp::Ordering;
use core::marker::PhantomData;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::entity::Entity;
use crate::error::CoreError;
use crate::repository::{Repository, SearchableRepository};
use crate::search::{SearchFilter, SearchParams, SearchResult, SortDirection};

/// Field used by the fallback ordering when no sortable field is requested.
pub const FALLBACK_SORT_FIELD: &str = "created_at";

/// Entity-specific search behaviour for the in-memory backend.
pub trait SearchSpec: Send + Sync + 'static {
    type Item: Entity + Clone;
    type Filter: SearchFilter;

    /// Accepted sort keys. Must include [`FALLBACK_SORT_FIELD`].
    const SORTABLE_FIELDS: &'static [&'static str];

    fn matches(item: &Self::Item, filter: &Self::Filter) -> bool;

    /// Ascending comparison of two items on `field`. Only called with
    /// names from `SORTABLE_FIELDS`.
    fn compare(a: &Self::Item, b: &Self::Item, field: &str) -> Ordering;
}

/// Case-insensitive substring match used by every name filter.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub struct InMemoryRepository<S: SearchSpec> {
    items: Mutex<Vec<S::Item>>,
    _spec: PhantomData<fn() -> S>,
}

impl<S: SearchSpec> Default for InMemoryRepository<S> {
    fn default() -> Self {
        Self::with_items(Vec::new())
    }
}

impl<S: SearchSpec> InMemoryRepository<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<S::Item>) -> Self {
        Self {
            items: Mutex::new(items),
            _spec: PhantomData,
        }
    }

    /// Copy of the stored items in storage order.
    pub fn snapshot(&self) -> Result<Vec<S::Item>, CoreError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<S::Item>>, CoreError> {
        self.items
            .lock()
            .map_err(|_| CoreError::Internal("in-memory repository lock poisoned".into()))
    }

    /// Keep items matching `filter`, preserving order. `None` keeps all.
    pub fn apply_filter(items: Vec<S::Item>, filter: Option<&S::Filter>) -> Vec<S::Item> {
        match filter {
            Some(filter) => items
                .into_iter()
                .filter(|item| S::matches(item, filter))
                .collect(),
            None => items,
        }
    }

    /// Stable sort on `sort` when it is a sortable field, otherwise newest
    /// first by [`FALLBACK_SORT_FIELD`].
    pub fn apply_sort(
        mut items: Vec<S::Item>,
        sort: Option<&str>,
        sort_dir: Option<SortDirection>,
    ) -> Vec<S::Item> {
        let (field, dir) = match sort {
            Some(field) if S::SORTABLE_FIELDS.contains(&field) => {
                (field, sort_dir.unwrap_or(SortDirection::Asc))
            }
            _ => (FALLBACK_SORT_FIELD, SortDirection::Desc),
        };
        match dir {
            SortDirection::Asc => items.sort_by(|a, b| S::compare(a, b, field)),
            SortDirection::Desc => items.sort_by(|a, b| S::compare(b, a, field)),
        }
        items
    }

    /// Slice `[(page-1)*per_page, page*per_page)`. Out-of-range pages are
    /// empty.
    pub fn apply_paginate(items: Vec<S::Item>, page: u64, per_page: u64) -> Vec<S::Item> {
        let offset = page.saturating_sub(1).saturating_mul(per_page);
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(per_page).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take).collect()
    }

    fn position(items: &[S::Item], id: &<S::Item as Entity>::Id) -> Option<usize> {
        items.iter().position(|item| item.entity_id() == id)
    }
}

#[async_trait]
impl<S: SearchSpec> Repository<S::Item> for InMemoryRepository<S> {
    async fn insert(&self, entity: &S::Item) -> Result<(), CoreError> {
        self.lock()?.push(entity.clone());
        Ok(())
    }

    async fn bulk_insert(&self, entities: &[S::Item]) -> Result<(), CoreError> {
        let mut items = self.lock()?;
        items.splice(0..0, entities.iter().cloned());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &<S::Item as Entity>::Id,
    ) -> Result<Option<S::Item>, CoreError> {
        let items = self.lock()?;
        Ok(items.iter().find(|item| item.entity_id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<S::Item>, CoreError> {
        self.snapshot()
    }

    async fn update(&self, entity: &S::Item) -> Result<(), CoreError> {
        let mut items = self.lock()?;
        let id = entity.entity_id();
        let index = Self::position(&items, id)
            .ok_or_else(|| CoreError::not_found(<S::Item as Entity>::NAME, id))?;
        items[index] = entity.clone();
        Ok(())
    }

    async fn delete(&self, id: &<S::Item as Entity>::Id) -> Result<(), CoreError> {
        let mut items = self.lock()?;
        let index = Self::position(&items, id)
            .ok_or_else(|| CoreError::not_found(<S::Item as Entity>::NAME, id))?;
        items.remove(index);
        Ok(())
    }
}

#[async_trait]
impl<S: SearchSpec> SearchableRepository<S::Item, S::Filter> for InMemoryRepository<S> {
    fn sortable_fields(&self) -> &'static [&'static str] {
        S::SORTABLE_FIELDS
    }

    async fn search(
        &self,
        params: &SearchParams<S::Filter>,
    ) -> Result<SearchResult<S::Item>, CoreError> {
        let items = self.snapshot()?;
        let filtered = Self::apply_filter(items, params.filter());
        let sorted = Self::apply_sort(filtered, params.sort(), params.sort_dir());
        let total = sorted.len() as u64;
        let page = Self::apply_paginate(sorted, params.page(), params.per_page());

        tracing::debug!(
            entity = <S::Item as Entity>::NAME,
            total,
            page = params.page(),
            per_page = params.per_page(),
            "In-memory search"
        );

        Ok(SearchResult::new(page, total, params.page(), params.per_page()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Duration;

    use super::*;
    use crate::identifier::Identifier;
    use crate::notification::Notification;
    use crate::search::SearchInput;
    use crate::types::{now, Timestamp};

    #[derive(Debug, Clone)]
    struct Item {
        id: Identifier,
        name: String,
        created_at: Timestamp,
        notification: Notification,
    }

    impl Entity for Item {
        type Id = Identifier;
        const NAME: &'static str = "Item";

        fn entity_id(&self) -> &Identifier {
            &self.id
        }

        fn notification(&self) -> &Notification {
            &self.notification
        }

        fn validate(&mut self) {}
    }

    struct ItemSpec;

    impl SearchSpec for ItemSpec {
        type Item = Item;
        type Filter = String;

        const SORTABLE_FIELDS: &'static [&'static str] = &["name", "created_at"];

        fn matches(item: &Item, filter: &String) -> bool {
            contains_ignore_case(&item.name, filter)
        }

        fn compare(a: &Item, b: &Item, field: &str) -> Ordering {
            match field {
                "name" => a.name.cmp(&b.name),
                _ => a.created_at.cmp(&b.created_at),
            }
        }
    }

    type Repo = InMemoryRepository<ItemSpec>;

    /// Items created one second apart in the given order.
    fn items(names: &[&str]) -> Vec<Item> {
        let base = now();
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Item {
                id: Identifier::new(),
                name: name.to_string(),
                created_at: base + Duration::seconds(i as i64),
                notification: Notification::new(),
            })
            .collect()
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.name.as_str()).collect()
    }

    fn params(input: SearchInput<serde_json::Value>) -> SearchParams<String> {
        SearchParams::new(input)
    }

    // -- CRUD ----------------------------------------------------------------

    #[tokio::test]
    async fn insert_and_find_by_id() {
        let repo = Repo::new();
        let item = items(&["a"]).remove(0);
        repo.insert(&item).await.unwrap();

        let found = repo.find_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(found.name, "a");
        assert!(repo.find_by_id(&Identifier::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn bulk_insert_prepends() {
        let repo = Repo::with_items(items(&["existing"]));
        repo.bulk_insert(&items(&["x", "y"])).await.unwrap();
        assert_eq!(names(&repo.find_all().await.unwrap()), ["x", "y", "existing"]);
    }

    #[tokio::test]
    async fn update_replaces_stored_state() {
        let mut stored = items(&["before"]);
        let repo = Repo::with_items(stored.clone());
        stored[0].name = "after".into();
        repo.update(&stored[0]).await.unwrap();
        assert_eq!(names(&repo.find_all().await.unwrap()), ["after"]);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let repo = Repo::new();
        let item = items(&["a"]).remove(0);
        let err = repo.update(&item).await.unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "Item", ref id } if *id == item.id.to_string());
    }

    #[tokio::test]
    async fn delete_removes_and_rejects_unknown_ids() {
        let stored = items(&["a", "b"]);
        let repo = Repo::with_items(stored.clone());
        repo.delete(&stored[0].id).await.unwrap();
        assert_eq!(names(&repo.find_all().await.unwrap()), ["b"]);

        let err = repo.delete(&stored[0].id).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Item with id {} not found", stored[0].id));
    }

    // -- pipeline steps ------------------------------------------------------

    #[test]
    fn filter_none_keeps_everything() {
        let all = items(&["a", "b"]);
        assert_eq!(names(&Repo::apply_filter(all, None)), ["a", "b"]);
    }

    #[test]
    fn filter_is_case_insensitive_substring_in_storage_order() {
        let all = items(&["test", "a", "TEST", "TeSt"]);
        let filtered = Repo::apply_filter(all, Some(&"TEST".to_string()));
        assert_eq!(names(&filtered), ["test", "TEST", "TeSt"]);
    }

    #[test]
    fn filter_is_idempotent() {
        let filter = "es".to_string();
        let once = Repo::apply_filter(items(&["test", "best", "no"]), Some(&filter));
        let twice = Repo::apply_filter(once.clone(), Some(&filter));
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn sort_by_sortable_field() {
        let all = items(&["b", "a", "c"]);
        let asc = Repo::apply_sort(all.clone(), Some("name"), Some(SortDirection::Asc));
        assert_eq!(names(&asc), ["a", "b", "c"]);
        let desc = Repo::apply_sort(all, Some("name"), Some(SortDirection::Desc));
        assert_eq!(names(&desc), ["c", "b", "a"]);
    }

    #[test]
    fn sort_is_case_sensitive() {
        let sorted = Repo::apply_sort(items(&["b", "B", "a", "A"]), Some("name"), None);
        assert_eq!(names(&sorted), ["A", "B", "a", "b"]);
    }

    #[test]
    fn unknown_or_missing_sort_falls_back_to_newest_first() {
        let all = items(&["first", "second", "third"]);
        let unknown = Repo::apply_sort(all.clone(), Some("price"), Some(SortDirection::Asc));
        assert_eq!(names(&unknown), ["third", "second", "first"]);
        let missing = Repo::apply_sort(all, None, None);
        assert_eq!(names(&missing), ["third", "second", "first"]);
    }

    #[test]
    fn paginate_slices_and_handles_out_of_range() {
        let all = items(&["a", "b", "c", "d", "e"]);
        assert_eq!(names(&Repo::apply_paginate(all.clone(), 1, 2)), ["a", "b"]);
        assert_eq!(names(&Repo::apply_paginate(all.clone(), 3, 2)), ["e"]);
        assert!(Repo::apply_paginate(all.clone(), 4, 2).is_empty());
        assert!(Repo::apply_paginate(all, u64::MAX, u64::MAX).is_empty());
    }

    // -- search --------------------------------------------------------------

    #[tokio::test]
    async fn search_empty_repository() {
        let repo = Repo::new();
        let result = repo.search(&SearchParams::<String>::default()).await.unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(result.current_page, 1);
        assert_eq!(result.per_page, 15);
        assert_eq!(result.last_page, 0);
    }

    #[tokio::test]
    async fn search_without_params_paginates_newest_first() {
        let stored = items(&(0..16).map(|_| "x").collect::<Vec<_>>());
        let repo = Repo::with_items(stored.clone());

        let result = repo.search(&SearchParams::<String>::default()).await.unwrap();
        assert_eq!(result.items.len(), 15);
        assert_eq!(result.total, 16);
        assert_eq!(result.last_page, 2);
        assert_eq!(result.items[0].id, stored[15].id);
        assert_eq!(result.items[14].id, stored[1].id);
    }

    #[tokio::test]
    async fn search_sorts_then_paginates() {
        let repo = Repo::with_items(items(&["b", "a", "d", "e", "c"]));

        let cases = [
            (1, "asc", vec!["a", "b"]),
            (2, "asc", vec!["c", "d"]),
            (3, "asc", vec!["e"]),
            (1, "desc", vec!["e", "d"]),
            (2, "desc", vec!["c", "b"]),
        ];
        for (page, dir, expected) in cases {
            let p = params(SearchInput::new().sort("name").sort_dir(dir).per_page(2).page(page));
            let result = repo.search(&p).await.unwrap();
            assert_eq!(names(&result.items), expected, "page {page} dir {dir}");
            assert_eq!(result.total, 5);
            assert_eq!(result.last_page, 3);
        }
    }

    #[tokio::test]
    async fn search_filters_sorts_and_paginates() {
        let repo = Repo::with_items(items(&["test", "a", "TEST", "e", "TeSt"]));

        let p = params(
            SearchInput::new()
                .filter("TEST".into())
                .sort("name")
                .per_page(2)
                .page(1),
        );
        let result = repo.search(&p).await.unwrap();
        assert_eq!(names(&result.items), ["TEST", "TeSt"]);
        assert_eq!(result.total, 3);
        assert_eq!(result.last_page, 2);

        let p = params(
            SearchInput::new()
                .filter("TEST".into())
                .sort("name")
                .per_page(2)
                .page(2),
        );
        let result = repo.search(&p).await.unwrap();
        assert_eq!(names(&result.items), ["test"]);
    }

    #[tokio::test]
    async fn search_out_of_range_page_keeps_total() {
        let repo = Repo::with_items(items(&["a", "b", "c"]));
        let p = params(SearchInput::new().page(10).per_page(2));
        let result = repo.search(&p).await.unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total, 3);
        assert_eq!(result.current_page, 10);
        assert_eq!(result.last_page, 2);
    }

    #[tokio::test]
    async fn pages_partition_the_sorted_sequence() {
        let repo = Repo::with_items(items(&["g", "c", "a", "f", "b", "e", "d"]));
        let first = repo
            .search(&params(SearchInput::new().sort("name").per_page(3)))
            .await
            .unwrap();

        let mut collected = Vec::new();
        for page in 1..=first.last_page {
            let p = params(SearchInput::new().sort("name").per_page(3).page(page));
            let result = repo.search(&p).await.unwrap();
            collected.extend(result.items.into_iter().map(|item| item.name));
        }
        assert_eq!(collected, ["a", "b", "c", "d", "e", "f", "g"]);
    }

    #[tokio::test]
    async fn sortable_fields_come_from_search_spec() {
        assert_eq!(Repo::new().sortable_fields(), ["name", "created_at"]);
    }
}
