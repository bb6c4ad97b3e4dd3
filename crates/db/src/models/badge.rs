//! Badge entity models and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use sephirots_core::types::{DbId, Timestamp};

/// A row from the `badges` table.
///
/// `tier` is stored as text and parsed into
/// [`sephirots_core::badges::BadgeTier`] at the domain boundary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Badge {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub tier: String,
    pub level: i32,
    pub points: i32,
    pub icon: String,
    pub symbolism: Option<String>,
    pub requirement: Option<String>,
    pub is_limited: bool,
    pub max_supply: Option<i32>,
    pub special_effect: Option<String>,
    pub created_at: Timestamp,
}

/// A badge joined with the owning user's earn record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EarnedBadge {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub tier: String,
    pub level: i32,
    pub points: i32,
    pub icon: String,
    pub special_effect: Option<String>,
    pub earned_at: Timestamp,
    pub enhanced: bool,
}

/// A row from the `badge_progress` table, with the badge name joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BadgeProgressItem {
    pub user_id: DbId,
    pub badge_id: DbId,
    pub badge_name: String,
    pub current_progress: i32,
    pub max_progress: i32,
}
