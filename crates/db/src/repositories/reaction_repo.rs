//! Repository for the `cosmic_reactions` table.
//!
//! The toggle is atomic per (content_type, content_id, user_id, emoji_id):
//! the unique constraint on that tuple guarantees rapid repeated requests
//! can never double-add, and the insert-else-delete sequence resolves
//! concurrent toggles to exactly one net reaction.

use sqlx::PgPool;

use sephirots_core::types::DbId;

use crate::models::reaction::{ReactionCount, ToggleOutcome};

/// Provides reaction toggle and summary operations.
pub struct ReactionRepo;

impl ReactionRepo {
    /// Toggle a reaction on or off, returning the authoritative outcome.
    ///
    /// Tries to insert first; if the row already exists (`DO NOTHING`
    /// affects no rows), deletes it instead. The post-toggle count is read
    /// inside the same transaction.
    pub async fn toggle(
        pool: &PgPool,
        content_type: &str,
        content_id: DbId,
        user_id: DbId,
        emoji_id: &str,
    ) -> Result<ToggleOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO cosmic_reactions (content_type, content_id, user_id, emoji_id) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT uq_cosmic_reactions_key DO NOTHING",
        )
        .bind(content_type)
        .bind(content_id)
        .bind(user_id)
        .bind(emoji_id)
        .execute(&mut *tx)
        .await?;

        let added = inserted.rows_affected() > 0;

        if !added {
            sqlx::query(
                "DELETE FROM cosmic_reactions \
                 WHERE content_type = $1 AND content_id = $2 \
                   AND user_id = $3 AND emoji_id = $4",
            )
            .bind(content_type)
            .bind(content_id)
            .bind(user_id)
            .bind(emoji_id)
            .execute(&mut *tx)
            .await?;
        }

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM cosmic_reactions \
             WHERE content_type = $1 AND content_id = $2 AND emoji_id = $3",
        )
        .bind(content_type)
        .bind(content_id)
        .bind(emoji_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ToggleOutcome {
            added,
            removed: !added,
            count,
        })
    }

    /// Per-emoji counts for a piece of content, with the requesting user's
    /// has-reacted flag.
    pub async fn counts_for_content(
        pool: &PgPool,
        content_type: &str,
        content_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<ReactionCount>, sqlx::Error> {
        sqlx::query_as::<_, ReactionCount>(
            "SELECT emoji_id, COUNT(*) AS count, \
                    BOOL_OR(user_id = $3) AS has_reacted \
             FROM cosmic_reactions \
             WHERE content_type = $1 AND content_id = $2 \
             GROUP BY emoji_id \
             ORDER BY emoji_id",
        )
        .bind(content_type)
        .bind(content_id)
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
