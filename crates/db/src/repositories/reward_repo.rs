//! Repository for the `rewards` and `reward_redemptions` tables.

use sqlx::PgPool;

use sephirots_core::types::DbId;

use crate::models::reward::{RedeemOutcome, Reward};

/// Column list for `rewards` queries.
const COLUMNS: &str = "id, name, description, category, points_cost, remaining, created_at";

/// Provides reward catalog and redemption operations.
pub struct RewardRepo;

impl RewardRepo {
    /// List the reward catalog, cheapest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Reward>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rewards ORDER BY points_cost, name");
        sqlx::query_as::<_, Reward>(&query).fetch_all(pool).await
    }

    /// Find a reward by id.
    pub async fn find_by_id(
        pool: &PgPool,
        reward_id: DbId,
    ) -> Result<Option<Reward>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rewards WHERE id = $1");
        sqlx::query_as::<_, Reward>(&query)
            .bind(reward_id)
            .fetch_optional(pool)
            .await
    }

    /// Redeem a reward for a user.
    ///
    /// Runs in one transaction with both decrements guarded in SQL, so the
    /// balance can never go negative and limited supply can never be
    /// oversold, regardless of concurrent redemption attempts:
    ///
    /// 1. `UPDATE users SET points = points - cost WHERE points >= cost`
    /// 2. `UPDATE rewards SET remaining = remaining - 1 WHERE remaining > 0`
    ///    (skipped for unlimited rewards)
    /// 3. insert the redemption record
    pub async fn redeem(
        pool: &PgPool,
        user_id: DbId,
        reward: &Reward,
    ) -> Result<RedeemOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Decrement supply first so an exhausted reward never charges points.
        if reward.remaining.is_some() {
            let supply = sqlx::query(
                "UPDATE rewards SET remaining = remaining - 1 \
                 WHERE id = $1 AND remaining > 0",
            )
            .bind(reward.id)
            .execute(&mut *tx)
            .await?;

            if supply.rows_affected() == 0 {
                tx.rollback().await?;
                return Ok(RedeemOutcome::SoldOut);
            }
        }

        let points_remaining: Option<i64> = sqlx::query_scalar(
            "UPDATE users SET points = points - $2 \
             WHERE id = $1 AND points >= $2 \
             RETURNING points",
        )
        .bind(user_id)
        .bind(reward.points_cost)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(points_remaining) = points_remaining else {
            tx.rollback().await?;
            let points: i64 = sqlx::query_scalar("SELECT points FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;
            return Ok(RedeemOutcome::InsufficientPoints { points });
        };

        sqlx::query(
            "INSERT INTO reward_redemptions (reward_id, user_id, points_spent) \
             VALUES ($1, $2, $3)",
        )
        .bind(reward.id)
        .bind(user_id)
        .bind(reward.points_cost)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(RedeemOutcome::Redeemed { points_remaining })
    }
}
