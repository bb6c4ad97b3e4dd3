//! HTTP-level integration tests for reward redemption and points tiers.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, register_user};
use serde_json::json;
use sqlx::PgPool;

/// Give a user points directly.
async fn grant_points(pool: &PgPool, user_id: i64, points: i64) {
    sqlx::query("UPDATE users SET points = points + $2 WHERE id = $1")
        .bind(user_id)
        .bind(points)
        .execute(pool)
        .await
        .expect("points grant should succeed");
}

/// Insert a reward and return its id.
async fn seed_reward(pool: &PgPool, name: &str, cost: i64, remaining: Option<i32>) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO rewards (name, description, category, points_cost, remaining) \
         VALUES ($1, 'test reward', 'cosmetic', $2, $3) \
         RETURNING id",
    )
    .bind(name)
    .bind(cost)
    .bind(remaining)
    .fetch_one(pool)
    .await
    .expect("reward insert should succeed")
}

/// The catalog annotates each reward with affordability for the caller.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_catalog_affordability(pool: PgPool) {
    let reward_id = seed_reward(&pool, "Test Trinket", 200, None).await;
    let app = common::build_test_app(pool.clone());
    let (user_id, token) = register_user(&app, "browser").await;
    grant_points(&pool, user_id, 150).await;

    let response = get_auth(app, "/api/v1/rewards", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let trinket = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == reward_id)
        .expect("seeded reward in catalog");
    assert_eq!(trinket["affordable"], false);
    assert_eq!(trinket["points_needed"], 50);
}

/// Redemption decrements the balance and records the spend.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_redeem_success(pool: PgPool) {
    let reward_id = seed_reward(&pool, "Affordable", 100, None).await;
    let app = common::build_test_app(pool.clone());
    let (user_id, token) = register_user(&app, "spender").await;
    grant_points(&pool, user_id, 250).await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/rewards/{reward_id}/redeem"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["points_spent"], 100);
    assert_eq!(json["data"]["points_remaining"], 150);
}

/// Redemption with insufficient points is a 409 and charges nothing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_redeem_insufficient_points(pool: PgPool) {
    let reward_id = seed_reward(&pool, "Pricey", 1_000, None).await;
    let app = common::build_test_app(pool.clone());
    let (user_id, token) = register_user(&app, "broke").await;
    grant_points(&pool, user_id, 10).await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/rewards/{reward_id}/redeem"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let points: i64 = sqlx::query_scalar("SELECT points FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(points, 10, "failed redemption must not charge points");
}

/// A limited reward sells out and later attempts are 409s.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_redeem_sold_out(pool: PgPool) {
    let reward_id = seed_reward(&pool, "Limited", 50, Some(1)).await;
    let app = common::build_test_app(pool.clone());

    let (first_id, first) = register_user(&app, "quick").await;
    let (second_id, second) = register_user(&app, "slow").await;
    grant_points(&pool, first_id, 100).await;
    grant_points(&pool, second_id, 100).await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/rewards/{reward_id}/redeem"),
        json!({}),
        &first,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        app,
        &format!("/api/v1/rewards/{reward_id}/redeem"),
        json!({}),
        &second,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The second user keeps their points.
    let points: i64 = sqlx::query_scalar("SELECT points FROM users WHERE id = $1")
        .bind(second_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(points, 100);
}

/// Points standing reflects the tier ladder.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_points_standing(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (user_id, token) = register_user(&app, "climber").await;
    grant_points(&pool, user_id, 1_200).await;

    let response = get_auth(app, "/api/v1/users/me/points", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["points"], 1_200);
    assert_eq!(json["data"]["standing"]["tier"], 1);
    assert_eq!(json["data"]["standing"]["name"], "Initiate");
    assert_eq!(json["data"]["standing"]["progress"], 5);
}
