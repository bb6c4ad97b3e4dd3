//! Repository for the `users` table.

use sqlx::PgPool;

use sephirots_core::types::DbId;

use crate::models::user::{CreateUser, PublicUser, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, username, display_name, email, password_hash, points, level, \
                       interests, is_ai, role, created_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Create a user, returning the full row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, display_name, email, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.display_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, user_id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Public view of a user.
    pub async fn find_public(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<PublicUser>, sqlx::Error> {
        sqlx::query_as::<_, PublicUser>(
            "SELECT id, username, display_name, points, level, is_ai \
             FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Atomically add points to a user's balance, returning the new balance.
    pub async fn add_points(
        pool: &PgPool,
        user_id: DbId,
        points: i64,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE users SET points = points + $2 WHERE id = $1 RETURNING points",
        )
        .bind(user_id)
        .bind(points)
        .fetch_one(pool)
        .await
    }

    /// Current points balance for a user.
    pub async fn points(pool: &PgPool, user_id: DbId) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar("SELECT points FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
