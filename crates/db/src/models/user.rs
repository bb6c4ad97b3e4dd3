//! User entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sephirots_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub display_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub points: i64,
    pub level: i32,
    pub interests: Vec<String>,
    pub is_ai: bool,
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for creating a user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Public view of a user, safe to embed in any response.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicUser {
    pub id: DbId,
    pub username: String,
    pub display_name: String,
    pub points: i64,
    pub level: i32,
    pub is_ai: bool,
}
