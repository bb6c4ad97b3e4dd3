//! HTTP-level integration tests for donation tiers and the Stripe webhook.
//!
//! Checkout session creation talks to the live Stripe API and is not
//! exercised here; the webhook flow is tested end to end with locally
//! signed payloads.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get, get_auth, register_user, TEST_WEBHOOK_SECRET};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use sqlx::PgPool;
use tower::ServiceExt;

/// Compute a `Stripe-Signature` header value for a payload.
fn sign_payload(payload: &str) -> String {
    let timestamp = "1700000000";
    let mut mac = Hmac::<Sha256>::new_from_slice(TEST_WEBHOOK_SECRET.as_bytes()).unwrap();
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    format!("t={timestamp},v1={signature}")
}

/// POST a raw webhook payload with the given signature header.
async fn post_webhook(app: axum::Router, payload: &str, signature: &str) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/donations/webhook")
            .header("content-type", "application/json")
            .header("stripe-signature", signature)
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Insert a pending donation keyed by a checkout session id.
async fn seed_pending_donation(pool: &PgPool, user_id: i64, session_id: &str) {
    sqlx::query(
        "INSERT INTO donations (user_id, tier_slug, kind, amount_cents, stripe_session_id) \
         VALUES ($1, 'seed-planter', 'one_time', 1500, $2)",
    )
    .bind(user_id)
    .bind(session_id)
    .execute(pool)
    .await
    .expect("donation insert should succeed");
}

/// The tier catalog is public and carries both price points per tier.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_tier_catalog(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/donations/tiers").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let tiers = json["data"].as_array().unwrap();
    assert_eq!(tiers.len(), 3);

    let seed = &tiers[0];
    assert_eq!(seed["slug"], "seed-planter");
    assert_eq!(seed["one_time_cents"], 1500);
    assert_eq!(seed["monthly_cents"], 300);
}

/// A signed completion webhook settles the donation and awards the badge.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_webhook_completes_donation(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (user_id, token) = register_user(&app, "donor").await;
    seed_pending_donation(&pool, user_id, "cs_test_settle").await;

    let payload = json!({
        "type": "checkout.session.completed",
        "data": { "object": { "id": "cs_test_settle" } },
    })
    .to_string();
    let signature = sign_payload(&payload);

    let response = post_webhook(app.clone(), &payload, &signature).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["received"], true);

    let status: String =
        sqlx::query_scalar("SELECT status FROM donations WHERE stripe_session_id = $1")
            .bind("cs_test_settle")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, "completed");

    // The supporter badge for the tier is awarded.
    let badges = get_auth(app, &format!("/api/v1/users/{user_id}/badges"), &token).await;
    let json = body_json(badges).await;
    let names: Vec<&str> = json["data"]["badges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Seed Planter"), "badges: {names:?}");
}

/// Webhook retries settle exactly once and stay idempotent.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_webhook_retry_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (user_id, _) = register_user(&app, "retry").await;
    seed_pending_donation(&pool, user_id, "cs_test_retry").await;

    let payload = json!({
        "type": "checkout.session.completed",
        "data": { "object": { "id": "cs_test_retry" } },
    })
    .to_string();
    let signature = sign_payload(&payload);

    for _ in 0..2 {
        let response = post_webhook(app.clone(), &payload, &signature).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let badge_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user_badges WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(badge_count, 1, "retries must not award the badge twice");
}

/// An unsigned or tampered webhook is rejected without touching the donation.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_webhook_bad_signature_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (user_id, _) = register_user(&app, "victim").await;
    seed_pending_donation(&pool, user_id, "cs_test_forged").await;

    let payload = json!({
        "type": "checkout.session.completed",
        "data": { "object": { "id": "cs_test_forged" } },
    })
    .to_string();

    let response = post_webhook(app.clone(), &payload, "t=1700000000,v1=deadbeef").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let status: String =
        sqlx::query_scalar("SELECT status FROM donations WHERE stripe_session_id = $1")
            .bind("cs_test_forged")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, "pending");
}

/// An expiry webhook fails the pending donation.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_webhook_expiry_fails_donation(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (user_id, _) = register_user(&app, "expired").await;
    seed_pending_donation(&pool, user_id, "cs_test_expired").await;

    let payload = json!({
        "type": "checkout.session.expired",
        "data": { "object": { "id": "cs_test_expired" } },
    })
    .to_string();
    let signature = sign_payload(&payload);

    let response = post_webhook(app, &payload, &signature).await;
    assert_eq!(response.status(), StatusCode::OK);

    let status: String =
        sqlx::query_scalar("SELECT status FROM donations WHERE stripe_session_id = $1")
            .bind("cs_test_expired")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, "failed");
}

/// Checkout with an unknown tier slug is a 400 before any Stripe call.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_checkout_unknown_tier(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_user(&app, "confused").await;

    let response = common::post_json_auth(
        app,
        "/api/v1/donations/checkout",
        json!({ "tier_slug": "sun-bringer", "kind": "one_time" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
