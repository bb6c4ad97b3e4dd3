//! Repository for the `quests` and `user_quests` tables.

use sqlx::PgPool;

use sephirots_core::types::DbId;

use crate::models::quest::{Quest, QuestWithProgress, UserQuest};

/// Column list for `quests` queries.
const COLUMNS: &str = "id, title, description, kind, requirements, points, badge_reward_id, \
                       starts_at, ends_at, created_at";

/// Provides quest catalog and per-user progress operations.
pub struct QuestRepo;

impl QuestRepo {
    /// Find a quest by id.
    pub async fn find_by_id(pool: &PgPool, quest_id: DbId) -> Result<Option<Quest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quests WHERE id = $1");
        sqlx::query_as::<_, Quest>(&query)
            .bind(quest_id)
            .fetch_optional(pool)
            .await
    }

    /// List currently-open quests joined with the given user's progress.
    ///
    /// A quest is open when its window contains now (open-ended windows
    /// always qualify).
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<QuestWithProgress>, sqlx::Error> {
        sqlx::query_as::<_, QuestWithProgress>(
            "SELECT q.id, q.title, q.description, q.kind, q.requirements, q.points, \
                    q.badge_reward_id, uq.progress, uq.status, uq.completed_at \
             FROM quests q \
             LEFT JOIN user_quests uq ON uq.quest_id = q.id AND uq.user_id = $1 \
             WHERE (q.starts_at IS NULL OR q.starts_at <= NOW()) \
               AND (q.ends_at IS NULL OR q.ends_at > NOW()) \
             ORDER BY q.kind, q.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// One quest joined with the given user's progress.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        quest_id: DbId,
    ) -> Result<Option<QuestWithProgress>, sqlx::Error> {
        sqlx::query_as::<_, QuestWithProgress>(
            "SELECT q.id, q.title, q.description, q.kind, q.requirements, q.points, \
                    q.badge_reward_id, uq.progress, uq.status, uq.completed_at \
             FROM quests q \
             LEFT JOIN user_quests uq ON uq.quest_id = q.id AND uq.user_id = $1 \
             WHERE q.id = $2",
        )
        .bind(user_id)
        .bind(quest_id)
        .fetch_optional(pool)
        .await
    }

    /// The user's progress row for one quest, if any.
    pub async fn user_quest(
        pool: &PgPool,
        user_id: DbId,
        quest_id: DbId,
    ) -> Result<Option<UserQuest>, sqlx::Error> {
        sqlx::query_as::<_, UserQuest>(
            "SELECT id, user_id, quest_id, progress, status, completed_at, updated_at \
             FROM user_quests \
             WHERE user_id = $1 AND quest_id = $2",
        )
        .bind(user_id)
        .bind(quest_id)
        .fetch_optional(pool)
        .await
    }

    /// Merge reported progress into the user's progress map.
    ///
    /// Upserts the row and merges at the JSONB level so concurrent reports
    /// for different goal keys do not clobber each other. Completed quests
    /// are left untouched; reporting against one returns `None`.
    pub async fn merge_progress(
        pool: &PgPool,
        user_id: DbId,
        quest_id: DbId,
        progress: &serde_json::Value,
    ) -> Result<Option<UserQuest>, sqlx::Error> {
        sqlx::query_as::<_, UserQuest>(
            "INSERT INTO user_quests (user_id, quest_id, progress, status) \
             VALUES ($1, $2, $3, 'in_progress') \
             ON CONFLICT ON CONSTRAINT uq_user_quests_user_quest DO UPDATE \
             SET progress = user_quests.progress || EXCLUDED.progress, \
                 status = CASE WHEN user_quests.status = 'completed' \
                               THEN user_quests.status ELSE 'in_progress' END, \
                 updated_at = NOW() \
             WHERE user_quests.status <> 'completed' \
             RETURNING id, user_id, quest_id, progress, status, completed_at, updated_at",
        )
        .bind(user_id)
        .bind(quest_id)
        .bind(progress)
        .fetch_optional(pool)
        .await
    }

    /// Mark a quest completed for a user.
    ///
    /// Guarded so a quest can only transition to completed once; returns
    /// `true` on the winning transition, `false` if it was already
    /// completed (or the user never started it).
    pub async fn mark_completed(
        pool: &PgPool,
        user_id: DbId,
        quest_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_quests \
             SET status = 'completed', completed_at = NOW(), updated_at = NOW() \
             WHERE user_id = $1 AND quest_id = $2 AND status <> 'completed'",
        )
        .bind(user_id)
        .bind(quest_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
