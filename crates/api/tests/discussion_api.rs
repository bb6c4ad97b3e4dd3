//! HTTP-level integration tests for discussions.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json_auth, register_user};
use serde_json::json;
use sqlx::PgPool;

/// Creating a discussion requires auth and returns the stored row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_discussion(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, token) = register_user(&app, "writer").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/discussions",
        json!({
            "title": "On morning stillness",
            "content": "What does your practice look like?",
            "category": "practice",
            "tags": ["meditation"],
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["author_id"], user_id);
    assert_eq!(json["data"]["category"], "practice");
    assert_eq!(json["data"]["views"], 0);

    // Unauthenticated creation is rejected.
    let anon = common::post_json(
        app,
        "/api/v1/discussions",
        json!({ "title": "t", "content": "c" }),
    )
    .await;
    assert_eq!(anon.status(), StatusCode::UNAUTHORIZED);
}

/// An empty title is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_discussion_empty_title(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_user(&app, "blankwriter").await;

    let response = post_json_auth(
        app,
        "/api/v1/discussions",
        json!({ "title": "   ", "content": "body" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Listing filters by category; fetching bumps the view counter.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_and_view(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_user(&app, "reader").await;

    let create = post_json_auth(
        app.clone(),
        "/api/v1/discussions",
        json!({ "title": "Starlight", "content": "c", "category": "cosmos" }),
        &token,
    )
    .await;
    let discussion_id = body_json(create).await["data"]["id"].as_i64().unwrap();

    post_json_auth(
        app.clone(),
        "/api/v1/discussions",
        json!({ "title": "Other", "content": "c" }),
        &token,
    )
    .await;

    let list = get(app.clone(), "/api/v1/discussions?category=cosmos").await;
    let json = body_json(list).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Two fetches bump views twice.
    get(app.clone(), &format!("/api/v1/discussions/{discussion_id}")).await;
    let second = get(app, &format!("/api/v1/discussions/{discussion_id}")).await;
    let json = body_json(second).await;
    assert_eq!(json["data"]["views"], 2);
}

/// Fetching an unknown discussion is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_unknown_discussion(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/discussions/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
