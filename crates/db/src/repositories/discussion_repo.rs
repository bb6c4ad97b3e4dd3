//! Repository for the `discussions` table.

use sqlx::PgPool;

use sephirots_core::types::DbId;

use crate::models::discussion::{CreateDiscussion, Discussion, DiscussionListParams};

/// Column list for `discussions` queries.
const COLUMNS: &str = "id, title, content, author_id, category, tags, likes, views, created_at";

/// Default page size for discussion listings.
const DEFAULT_LIMIT: i64 = 50;

/// Provides CRUD operations for discussions.
pub struct DiscussionRepo;

impl DiscussionRepo {
    /// Create a discussion, returning the full row.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        input: &CreateDiscussion,
    ) -> Result<Discussion, sqlx::Error> {
        let query = format!(
            "INSERT INTO discussions (title, content, author_id, category, tags) \
             VALUES ($1, $2, $3, COALESCE($4, 'general'), $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Discussion>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(author_id)
            .bind(input.category.as_deref())
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a discussion by id, incrementing its view counter.
    pub async fn find_and_view(
        pool: &PgPool,
        discussion_id: DbId,
    ) -> Result<Option<Discussion>, sqlx::Error> {
        let query = format!(
            "UPDATE discussions SET views = views + 1 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Discussion>(&query)
            .bind(discussion_id)
            .fetch_optional(pool)
            .await
    }

    /// List discussions, newest first, optionally filtered by category.
    pub async fn list(
        pool: &PgPool,
        params: &DiscussionListParams,
    ) -> Result<Vec<Discussion>, sqlx::Error> {
        let filter = if params.category.is_some() {
            "WHERE category = $1"
        } else {
            "WHERE $1::text IS NULL"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM discussions {filter} \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Discussion>(&query)
            .bind(params.category.as_deref())
            .bind(params.limit.unwrap_or(DEFAULT_LIMIT))
            .bind(params.offset.unwrap_or(0))
            .fetch_all(pool)
            .await
    }

    /// Most recent discussions, for the recommendation scorer.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Discussion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM discussions \
             ORDER BY created_at DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, Discussion>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
