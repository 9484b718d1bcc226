//! HTTP-level integration tests for `/api/v1/genres`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create, delete, get, patch_json, post_json};
use serde_json::{json, Value};

async fn category_id(app: &axum::Router, name: &str) -> String {
    let data = create(app, "/api/v1/categories", json!({ "name": name })).await;
    data["id"].as_str().unwrap().to_string()
}

fn names(json: &Value) -> Vec<String> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_genre_with_categories() {
    let app = build_test_app();
    let movie = category_id(&app, "Movie").await;
    let series = category_id(&app, "Series").await;

    let created = create(
        &app,
        "/api/v1/genres",
        json!({ "name": "Action", "categories_id": [movie, series, movie] }),
    )
    .await;
    assert_eq!(created["name"], "Action");
    assert_eq!(created["is_active"], true);

    let mut expected = vec![movie, series];
    expected.sort();
    assert_eq!(created["categories_id"], json!(expected));

    let uri = format!("/api/v1/genres/{}", created["id"].as_str().unwrap());
    let fetched = body_json(get(app, &uri).await).await;
    assert_eq!(fetched["data"], created);
}

#[tokio::test]
async fn test_create_genre_with_unknown_categories_is_404() {
    let app = build_test_app();
    let known = category_id(&app, "Movie").await;
    let missing = "3a0f2d63-58a4-4c1e-b7f5-0d1c6e9a2b88";

    let response = post_json(
        app,
        "/api/v1/genres",
        json!({ "name": "Action", "categories_id": [known, missing] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["message"],
        format!("Category with id {missing} not found")
    );
}

#[tokio::test]
async fn test_create_genre_requires_categories() {
    let response = post_json(
        build_test_app(),
        "/api/v1/genres",
        json!({ "name": "Action", "categories_id": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await,
        json!([{ "categories_id": ["categories_id must contain at least 1 item"] }])
    );
}

#[tokio::test]
async fn test_create_genre_with_malformed_category_id_is_422() {
    let response = post_json(
        build_test_app(),
        "/api/v1/genres",
        json!({ "name": "Action", "categories_id": ["nope"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json[0]["categories_id"][0], "ID nope must be a valid UUID");
}

#[tokio::test]
async fn test_update_replaces_categories_and_deactivates() {
    let app = build_test_app();
    let movie = category_id(&app, "Movie").await;
    let series = category_id(&app, "Series").await;
    let created = create(
        &app,
        "/api/v1/genres",
        json!({ "name": "Action", "categories_id": [movie] }),
    )
    .await;
    let uri = format!("/api/v1/genres/{}", created["id"].as_str().unwrap());

    let response = patch_json(
        app,
        &uri,
        json!({ "categories_id": [series], "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["name"], "Action");
    assert_eq!(data["categories_id"], json!([series]));
    assert_eq!(data["is_active"], false);
}

#[tokio::test]
async fn test_list_filters_by_category_intersection() {
    let app = build_test_app();
    let movie = category_id(&app, "Movie").await;
    let series = category_id(&app, "Series").await;
    let docs = category_id(&app, "Docs").await;
    for (name, cats) in [
        ("first", vec![movie.clone()]),
        ("second", vec![series.clone()]),
        ("both", vec![movie.clone(), series.clone()]),
        ("third", vec![docs.clone()]),
    ] {
        create(&app, "/api/v1/genres", json!({ "name": name, "categories_id": cats })).await;
    }

    let uri = format!("/api/v1/genres?sort=name&filter%5Bcategories_id%5D={movie},{series}");
    let json = body_json(get(app.clone(), &uri).await).await;
    assert_eq!(names(&json), ["both", "first", "second"]);
    assert_eq!(json["meta"]["total"], 3);

    let uri = format!("/api/v1/genres?filter%5Bname%5D=th&filter%5Bcategories_id%5D%5B%5D={docs}");
    let json = body_json(get(app, &uri).await).await;
    assert_eq!(names(&json), ["third"]);
}

#[tokio::test]
async fn test_list_with_bad_category_filter_is_422() {
    let response = get(build_test_app(), "/api/v1/genres?filter%5Bcategories_id%5D=nope").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_genre() {
    let app = build_test_app();
    let movie = category_id(&app, "Movie").await;
    let created = create(
        &app,
        "/api/v1/genres",
        json!({ "name": "Action", "categories_id": [movie] }),
    )
    .await;
    let uri = format!("/api/v1/genres/{}", created["id"].as_str().unwrap());

    assert_eq!(delete(app.clone(), &uri).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(app, &uri).await.status(), StatusCode::NOT_FOUND);
}
