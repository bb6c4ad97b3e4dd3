//! HTTP-level integration tests for quest progress and completion.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, register_user};
use serde_json::json;
use sqlx::PgPool;

/// Insert a quest directly and return its id.
async fn seed_quest(pool: &PgPool, title: &str, requirements: serde_json::Value) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO quests (title, description, kind, requirements, points) \
         VALUES ($1, 'test quest', 'daily', $2, 25) \
         RETURNING id",
    )
    .bind(title)
    .bind(requirements)
    .fetch_one(pool)
    .await
    .expect("quest insert should succeed")
}

/// Listing quests includes the seeded catalog with evaluations at 0%.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_quests_unstarted(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_user(&app, "quester").await;

    let response = get_auth(app, "/api/v1/quests", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let quests = json["data"].as_array().expect("quest list");
    assert!(!quests.is_empty(), "seed catalog quests should be listed");
    for quest in quests {
        assert_eq!(quest["evaluation"]["percentage"], 0);
        assert_eq!(quest["evaluation"]["complete"], false);
    }
}

/// Fetching one quest returns its evaluation; unknown ids are 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_quest(pool: PgPool) {
    let quest_id = seed_quest(
        &pool,
        "Single",
        json!({"visit": {"kind": "flag", "target": true}}),
    )
    .await;
    let app = common::build_test_app(pool);
    let (_, token) = register_user(&app, "fetcher").await;

    post_json_auth(
        app.clone(),
        &format!("/api/v1/quests/{quest_id}/progress"),
        json!({ "progress": { "visit": true } }),
        &token,
    )
    .await;

    let response = get_auth(app.clone(), &format!("/api/v1/quests/{quest_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], quest_id);
    assert_eq!(json["data"]["evaluation"]["percentage"], 100);

    let missing = get_auth(app, "/api/v1/quests/999999", &token).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

/// Partial progress yields a partial percentage; each goal is all-or-nothing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_partial_progress(pool: PgPool) {
    let quest_id = seed_quest(
        &pool,
        "Two Goals",
        json!({"visit": {"kind": "flag", "target": true},
               "replies": {"kind": "reach", "target": 3}}),
    )
    .await;
    let app = common::build_test_app(pool);
    let (_, token) = register_user(&app, "partial").await;

    // Satisfy the flag goal; leave the reach goal short of its target.
    let response = post_json_auth(
        app,
        &format!("/api/v1/quests/{quest_id}/progress"),
        json!({ "progress": { "visit": true, "replies": 2 } }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["satisfied"], 1);
    assert_eq!(json["data"]["total"], 2);
    assert_eq!(json["data"]["percentage"], 50);
    assert_eq!(json["data"]["complete"], false);
}

/// Progress reports merge per key instead of replacing the whole map.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_progress_merges_by_key(pool: PgPool) {
    let quest_id = seed_quest(
        &pool,
        "Merge",
        json!({"visit": {"kind": "flag", "target": true},
               "replies": {"kind": "reach", "target": 1}}),
    )
    .await;
    let app = common::build_test_app(pool);
    let (_, token) = register_user(&app, "merger").await;

    post_json_auth(
        app.clone(),
        &format!("/api/v1/quests/{quest_id}/progress"),
        json!({ "progress": { "visit": true } }),
        &token,
    )
    .await;

    // Reporting a different key keeps the earlier one.
    let response = post_json_auth(
        app,
        &format!("/api/v1/quests/{quest_id}/progress"),
        json!({ "progress": { "replies": 1 } }),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["complete"], true);
    assert_eq!(json["data"]["percentage"], 100);
}

/// Completing a quest awards points exactly once; a second claim is a 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_complete_awards_once(pool: PgPool) {
    let quest_id = seed_quest(
        &pool,
        "One Flag",
        json!({"visit": {"kind": "flag", "target": true}}),
    )
    .await;
    let app = common::build_test_app(pool);
    let (_, token) = register_user(&app, "completer").await;

    post_json_auth(
        app.clone(),
        &format!("/api/v1/quests/{quest_id}/progress"),
        json!({ "progress": { "visit": true } }),
        &token,
    )
    .await;

    let complete = post_json_auth(
        app.clone(),
        &format!("/api/v1/quests/{quest_id}/complete"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(complete.status(), StatusCode::OK);
    let json = body_json(complete).await;
    assert_eq!(json["data"]["points_awarded"], 25);
    assert_eq!(json["data"]["points_balance"], 25);

    // Second claim must not double-award.
    let again = post_json_auth(
        app.clone(),
        &format!("/api/v1/quests/{quest_id}/complete"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    // Progress reports against a completed quest are also rejected.
    let report = post_json_auth(
        app,
        &format!("/api/v1/quests/{quest_id}/progress"),
        json!({ "progress": { "visit": false } }),
        &token,
    )
    .await;
    assert_eq!(report.status(), StatusCode::CONFLICT);
}

/// Completing an unfinished quest is a 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_complete_unfinished_rejected(pool: PgPool) {
    let quest_id = seed_quest(
        &pool,
        "Unfinished",
        json!({"replies": {"kind": "reach", "target": 5}}),
    )
    .await;
    let app = common::build_test_app(pool);
    let (_, token) = register_user(&app, "early").await;

    post_json_auth(
        app.clone(),
        &format!("/api/v1/quests/{quest_id}/progress"),
        json!({ "progress": { "replies": 4 } }),
        &token,
    )
    .await;

    let complete = post_json_auth(
        app,
        &format!("/api/v1/quests/{quest_id}/complete"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(complete.status(), StatusCode::BAD_REQUEST);
}

/// A quest with no requirements can never be completed.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_requirements_never_complete(pool: PgPool) {
    let quest_id = seed_quest(&pool, "Empty", json!({})).await;
    let app = common::build_test_app(pool);
    let (_, token) = register_user(&app, "freeloader").await;

    let report = post_json_auth(
        app.clone(),
        &format!("/api/v1/quests/{quest_id}/progress"),
        json!({ "progress": {} }),
        &token,
    )
    .await;
    let json = body_json(report).await;
    assert_eq!(json["data"]["percentage"], 0);
    assert_eq!(json["data"]["complete"], false);

    let complete = post_json_auth(
        app,
        &format!("/api/v1/quests/{quest_id}/complete"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(complete.status(), StatusCode::BAD_REQUEST);
}

/// Reporting progress for a nonexistent quest is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_progress_unknown_quest(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_user(&app, "lost").await;

    let response = post_json_auth(
        app,
        "/api/v1/quests/999999/progress",
        json!({ "progress": { "visit": true } }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
