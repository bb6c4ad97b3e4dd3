//! HTTP-level integration tests for registration, login, token refresh,
//! and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth, register_user};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration returns 201 with tokens and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "username": "seeker",
        "email": "seeker@test.com",
        "password": "a_long_enough_password",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["username"], "seeker");
    // Display name defaults to the username when not supplied.
    assert_eq!(json["user"]["display_name"], "seeker");
}

/// A duplicate username is a 409 via the unique constraint.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_username(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(&app, "taken").await;

    let body = json!({
        "username": "taken",
        "email": "other@test.com",
        "password": "a_long_enough_password",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

/// A password below the minimum length is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "username": "shortpw",
        "email": "shortpw@test.com",
        "password": "short",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns tokens for an existing account.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, _) = register_user(&app, "loginuser").await;

    let body = json!({ "username": "loginuser", "password": "test_password_123!" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user_id);
    assert!(json["access_token"].is_string());
}

/// Login with an incorrect password returns 401 with a generic message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(&app, "wrongpw").await;

    let body = json!({ "username": "wrongpw", "password": "incorrect_password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login for an unknown username returns the same 401 as a bad password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "username": "ghost", "password": "test_password_123!" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Refresh and logout
// ---------------------------------------------------------------------------

/// Refresh rotates the token: the new pair works, the old one is revoked.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_rotation(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(&app, "refresher").await;

    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "username": "refresher", "password": "test_password_123!" }),
    )
    .await;
    let login_json = body_json(login).await;
    let old_refresh = login_json["refresh_token"].as_str().unwrap().to_string();

    // First refresh succeeds.
    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": old_refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());

    // Replaying the consumed refresh token fails.
    let replay = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": old_refresh }),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes all sessions; the refresh token stops working.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_user(&app, "leaver").await;

    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "username": "leaver", "password": "test_password_123!" }),
    )
    .await;
    let refresh_token = body_json(login).await["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    let logout = post_json_auth(app.clone(), "/api/v1/auth/logout", json!({}), &token).await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);

    let refresh = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Auth enforcement
// ---------------------------------------------------------------------------

/// Protected endpoints reject requests without a token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_protected_endpoint_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/api/v1/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A valid token resolves to the authenticated user's profile.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_with_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, token) = register_user(&app, "profileuser").await;

    let response = get_auth(app, "/api/v1/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user_id);
    assert_eq!(json["data"]["username"], "profileuser");
    // The password hash must never appear in responses.
    assert!(json["data"].get("password_hash").is_none());
}

/// A garbage token is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_token_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/users/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
