//! Repository for the `badges`, `user_badges`, and `badge_progress` tables.

use sqlx::PgPool;

use sephirots_core::types::DbId;

use crate::models::badge::{Badge, BadgeProgressItem, EarnedBadge};

/// Column list for `badges` queries.
const COLUMNS: &str = "id, name, description, tier, level, points, icon, symbolism, \
                       requirement, is_limited, max_supply, special_effect, created_at";

/// Provides read and award operations for badges.
pub struct BadgeRepo;

impl BadgeRepo {
    /// List the full badge catalog.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Badge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM badges ORDER BY level, name");
        sqlx::query_as::<_, Badge>(&query).fetch_all(pool).await
    }

    /// Find a badge by id.
    pub async fn find_by_id(pool: &PgPool, badge_id: DbId) -> Result<Option<Badge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM badges WHERE id = $1");
        sqlx::query_as::<_, Badge>(&query)
            .bind(badge_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a badge by exact name (used by the donation award flow).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Badge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM badges WHERE name = $1");
        sqlx::query_as::<_, Badge>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List a user's earned badges, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<EarnedBadge>, sqlx::Error> {
        sqlx::query_as::<_, EarnedBadge>(
            "SELECT b.id, b.name, b.description, b.tier, b.level, b.points, b.icon, \
                    b.special_effect, ub.earned_at, ub.enhanced \
             FROM user_badges ub \
             JOIN badges b ON b.id = ub.badge_id \
             WHERE ub.user_id = $1 \
             ORDER BY ub.earned_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Award a badge to a user.
    ///
    /// Idempotent: returns `true` if the badge was newly awarded, `false`
    /// if the user already had it.
    pub async fn award(pool: &PgPool, user_id: DbId, badge_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_badges (user_id, badge_id) \
             VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_user_badges_user_badge DO NOTHING",
        )
        .bind(user_id)
        .bind(badge_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a user's in-flight badge progress entries.
    pub async fn progress_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<BadgeProgressItem>, sqlx::Error> {
        sqlx::query_as::<_, BadgeProgressItem>(
            "SELECT bp.user_id, bp.badge_id, b.name AS badge_name, \
                    bp.current_progress, bp.max_progress \
             FROM badge_progress bp \
             JOIN badges b ON b.id = bp.badge_id \
             WHERE bp.user_id = $1 \
             ORDER BY b.name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
