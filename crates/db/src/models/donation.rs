//! Donation models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sephirots_core::types::{DbId, Timestamp};

/// A row from the `donations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Donation {
    pub id: DbId,
    pub user_id: DbId,
    pub tier_slug: String,
    pub kind: String,
    pub amount_cents: i64,
    pub stripe_session_id: String,
    pub status: String,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// DTO for starting a donation checkout.
#[derive(Debug, Deserialize)]
pub struct StartCheckout {
    pub tier_slug: String,
    pub kind: String,
}
