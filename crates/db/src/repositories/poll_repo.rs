//! Repository for the `polls` and `poll_votes` tables.

use sqlx::PgPool;

use sephirots_core::types::DbId;

use crate::models::poll::{CreatePoll, Poll};

/// Column list for `polls` queries.
const COLUMNS: &str = "id, question, options, creator_id, closes_at, created_at";

/// Provides poll operations.
pub struct PollRepo;

impl PollRepo {
    /// Create a poll, returning the full row.
    pub async fn create(
        pool: &PgPool,
        creator_id: DbId,
        input: &CreatePoll,
    ) -> Result<Poll, sqlx::Error> {
        let options = serde_json::to_value(&input.options)
            .unwrap_or_else(|_| serde_json::Value::Array(Vec::new()));
        let query = format!(
            "INSERT INTO polls (question, options, creator_id, closes_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Poll>(&query)
            .bind(&input.question)
            .bind(options)
            .bind(creator_id)
            .bind(input.closes_at)
            .fetch_one(pool)
            .await
    }

    /// List polls, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Poll>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM polls ORDER BY created_at DESC");
        sqlx::query_as::<_, Poll>(&query).fetch_all(pool).await
    }

    /// Find a poll by id.
    pub async fn find_by_id(pool: &PgPool, poll_id: DbId) -> Result<Option<Poll>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM polls WHERE id = $1");
        sqlx::query_as::<_, Poll>(&query)
            .bind(poll_id)
            .fetch_optional(pool)
            .await
    }

    /// Record a vote. The unique constraint on (poll_id, user_id) rejects a
    /// second vote with a 23505, mapped to 409 by the API layer.
    pub async fn record_vote(
        pool: &PgPool,
        poll_id: DbId,
        user_id: DbId,
        option_index: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO poll_votes (poll_id, user_id, option_index) \
             VALUES ($1, $2, $3)",
        )
        .bind(poll_id)
        .bind(user_id)
        .bind(option_index)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Vote counts per option index, for `option_count` options.
    ///
    /// Options with no votes are present with a count of zero.
    pub async fn vote_counts(
        pool: &PgPool,
        poll_id: DbId,
        option_count: usize,
    ) -> Result<Vec<i64>, sqlx::Error> {
        let rows: Vec<(i32, i64)> = sqlx::query_as(
            "SELECT option_index, COUNT(*) FROM poll_votes \
             WHERE poll_id = $1 \
             GROUP BY option_index",
        )
        .bind(poll_id)
        .fetch_all(pool)
        .await?;

        let mut counts = vec![0i64; option_count];
        for (index, count) in rows {
            if let Some(slot) = counts.get_mut(index as usize) {
                *slot = count;
            }
        }
        Ok(counts)
    }
}
