//! Integration tests for the PostgreSQL category repository.
//!
//! Covers persistence round trips, NotFound semantics and search parity
//! with the in-memory backend (filter, sort, paginate, fallback order).

use assert_matches::assert_matches;
use catalog_core::category::{Category, CategoryFilter, CategoryProps};
use catalog_core::error::CoreError;
use catalog_core::identifier::CategoryId;
use catalog_core::repository::{Repository, SearchableRepository};
use catalog_core::search::{SearchInput, SearchParams};
use catalog_core::types::now;
use catalog_db::repositories::PgCategoryRepository;
use chrono::Duration;
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn category(name: &str, age_secs: i64) -> Category {
    let mut props = CategoryProps::new(name);
    props.created_at = now() - Duration::seconds(age_secs);
    Category::new(props).unwrap()
}

fn params(input: SearchInput<Value>) -> SearchParams<CategoryFilter> {
    SearchParams::new(input)
}

fn names(items: &[Category]) -> Vec<&str> {
    items.iter().map(Category::name).collect()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_insert_and_find_by_id(pool: PgPool) {
    let repo = PgCategoryRepository::new(pool);
    let category = Category::new(
        CategoryProps::new("Movie")
            .description("some description")
            .is_active(false),
    )
    .unwrap();

    repo.insert(&category).await.unwrap();

    let found = repo.find_by_id(&category.category_id()).await.unwrap().unwrap();
    assert_eq!(found, category);
    assert_eq!(found.name(), "Movie");
    assert_eq!(found.description(), Some("some description"));
    assert!(!found.is_active());
    assert_eq!(found.created_at(), category.created_at());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_by_unknown_id_is_none(pool: PgPool) {
    let repo = PgCategoryRepository::new(pool);
    assert!(repo.find_by_id(&CategoryId::new()).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_insert_and_find_all(pool: PgPool) {
    let repo = PgCategoryRepository::new(pool);
    let items = vec![category("a", 20), category("b", 10)];
    repo.bulk_insert(&items).await.unwrap();
    repo.bulk_insert(&[]).await.unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(names(&all), ["a", "b"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_persists_changes(pool: PgPool) {
    let repo = PgCategoryRepository::new(pool);
    let mut category = category("Movie", 0);
    repo.insert(&category).await.unwrap();

    category.change_name("Documentary");
    category.change_description(Some("real".into()));
    category.deactivate();
    repo.update(&category).await.unwrap();

    let found = repo.find_by_id(&category.category_id()).await.unwrap().unwrap();
    assert_eq!(found.name(), "Documentary");
    assert_eq!(found.description(), Some("real"));
    assert!(!found.is_active());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_and_delete_unknown_id_fail(pool: PgPool) {
    let repo = PgCategoryRepository::new(pool);
    let category = category("Movie", 0);
    let expected = category.category_id().to_string();

    let err = repo.update(&category).await.unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "Category", ref id } if *id == expected);
    assert_eq!(
        err.to_string(),
        format!("Category with id {expected} not found")
    );

    let err = repo.delete(&category.category_id()).await.unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "Category", .. });
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_removes_row(pool: PgPool) {
    let repo = PgCategoryRepository::new(pool);
    let category = category("Movie", 0);
    repo.insert(&category).await.unwrap();

    repo.delete(&category.category_id()).await.unwrap();
    assert!(repo.find_by_id(&category.category_id()).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_search_defaults_to_newest_first(pool: PgPool) {
    let repo = PgCategoryRepository::new(pool);
    repo.bulk_insert(&[category("old", 30), category("new", 0), category("mid", 10)])
        .await
        .unwrap();

    let result = repo.search(&params(SearchInput::new())).await.unwrap();
    assert_eq!(names(&result.items), ["new", "mid", "old"]);
    assert_eq!(result.total, 3);
    assert_eq!(result.current_page, 1);
    assert_eq!(result.per_page, 15);
    assert_eq!(result.last_page, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_sorts_and_paginates_by_name(pool: PgPool) {
    let repo = PgCategoryRepository::new(pool);
    let items: Vec<_> = ["b", "a", "d", "e", "c"]
        .iter()
        .enumerate()
        .map(|(i, name)| category(name, i as i64))
        .collect();
    repo.bulk_insert(&items).await.unwrap();

    let asc = repo
        .search(&params(SearchInput::new().page(1).per_page(2).sort("name")))
        .await
        .unwrap();
    assert_eq!(names(&asc.items), ["a", "b"]);
    assert_eq!(asc.total, 5);
    assert_eq!(asc.last_page, 3);

    let desc = repo
        .search(&params(
            SearchInput::new().page(2).per_page(2).sort("name").sort_dir("desc"),
        ))
        .await
        .unwrap();
    assert_eq!(names(&desc.items), ["c", "b"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_name_sort_is_case_sensitive(pool: PgPool) {
    let repo = PgCategoryRepository::new(pool);
    repo.bulk_insert(&[category("b", 0), category("a", 1), category("B", 2)])
        .await
        .unwrap();

    let result = repo
        .search(&params(SearchInput::new().sort("name")))
        .await
        .unwrap();
    assert_eq!(names(&result.items), ["B", "a", "b"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_filter_is_case_insensitive_substring(pool: PgPool) {
    let repo = PgCategoryRepository::new(pool);
    repo.bulk_insert(&[
        category("test", 0),
        category("a", 1),
        category("TEST", 2),
        category("e", 3),
        category("TeSt", 4),
    ])
    .await
    .unwrap();

    let result = repo
        .search(&params(
            SearchInput::new().page(1).per_page(2).filter(json!("TEST")),
        ))
        .await
        .unwrap();
    assert_eq!(names(&result.items), ["test", "TEST"]);
    assert_eq!(result.total, 3);
    assert_eq!(result.last_page, 2);

    let result = repo
        .search(&params(
            SearchInput::new().page(2).per_page(2).filter(json!("TEST")),
        ))
        .await
        .unwrap();
    assert_eq!(names(&result.items), ["TeSt"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_unknown_sort_field_falls_back(pool: PgPool) {
    let repo = PgCategoryRepository::new(pool);
    repo.bulk_insert(&[category("a", 10), category("b", 0)])
        .await
        .unwrap();

    let result = repo
        .search(&params(SearchInput::new().sort("description").sort_dir("asc")))
        .await
        .unwrap();
    assert_eq!(names(&result.items), ["b", "a"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_page_past_end_keeps_total(pool: PgPool) {
    let repo = PgCategoryRepository::new(pool);
    repo.bulk_insert(&[category("a", 0), category("b", 1)])
        .await
        .unwrap();

    let result = repo
        .search(&params(SearchInput::new().page(5).per_page(2)))
        .await
        .unwrap();
    assert!(result.items.is_empty());
    assert_eq!(result.total, 2);
    assert_eq!(result.current_page, 5);
    assert_eq!(result.last_page, 1);
}
