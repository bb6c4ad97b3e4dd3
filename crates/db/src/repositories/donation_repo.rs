//! Repository for the `donations` table.

use sqlx::PgPool;

use sephirots_core::types::DbId;

use crate::models::donation::Donation;

/// Column list for `donations` queries.
const COLUMNS: &str = "id, user_id, tier_slug, kind, amount_cents, stripe_session_id, \
                       status, created_at, completed_at";

/// Provides donation lifecycle operations.
pub struct DonationRepo;

impl DonationRepo {
    /// Record a pending donation for a newly created checkout session.
    pub async fn create_pending(
        pool: &PgPool,
        user_id: DbId,
        tier_slug: &str,
        kind: &str,
        amount_cents: i64,
        stripe_session_id: &str,
    ) -> Result<Donation, sqlx::Error> {
        let query = format!(
            "INSERT INTO donations (user_id, tier_slug, kind, amount_cents, stripe_session_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(user_id)
            .bind(tier_slug)
            .bind(kind)
            .bind(amount_cents)
            .bind(stripe_session_id)
            .fetch_one(pool)
            .await
    }

    /// Mark a pending donation completed by its Stripe session id.
    ///
    /// Guarded on the pending status so webhook retries settle exactly
    /// once. Returns the completed row on the winning transition.
    pub async fn complete_by_session(
        pool: &PgPool,
        stripe_session_id: &str,
    ) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!(
            "UPDATE donations \
             SET status = 'completed', completed_at = NOW() \
             WHERE stripe_session_id = $1 AND status = 'pending' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(stripe_session_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a pending donation failed by its Stripe session id.
    pub async fn fail_by_session(
        pool: &PgPool,
        stripe_session_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE donations SET status = 'failed' \
             WHERE stripe_session_id = $1 AND status = 'pending'",
        )
        .bind(stripe_session_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a user's donations, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donations \
             WHERE user_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
