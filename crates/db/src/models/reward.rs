//! Reward catalog and redemption models.

use serde::Serialize;
use sqlx::FromRow;

use sephirots_core::types::{DbId, Timestamp};

/// A row from the `rewards` table. `remaining` is `None` for unlimited
/// supply.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reward {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub points_cost: i64,
    pub remaining: Option<i32>,
    pub created_at: Timestamp,
}

/// A row from the `reward_redemptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RewardRedemption {
    pub id: DbId,
    pub reward_id: DbId,
    pub user_id: DbId,
    pub points_spent: i64,
    pub redeemed_at: Timestamp,
}

/// Outcome of a redemption attempt, relayed to the handler.
#[derive(Debug, Clone)]
pub enum RedeemOutcome {
    /// Redemption succeeded; the user's remaining points balance.
    Redeemed { points_remaining: i64 },
    /// The user cannot afford the reward; their current balance.
    InsufficientPoints { points: i64 },
    /// The reward's limited supply is exhausted.
    SoldOut,
}
