//! Discussion entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sephirots_core::types::{DbId, Timestamp};

/// A row from the `discussions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Discussion {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub author_id: DbId,
    pub category: String,
    pub tags: Vec<String>,
    pub likes: i32,
    pub views: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a discussion.
#[derive(Debug, Deserialize)]
pub struct CreateDiscussion {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Query parameters for listing discussions.
#[derive(Debug, Deserialize)]
pub struct DiscussionListParams {
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
