//! Quest entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sephirots_core::types::{DbId, Timestamp};

/// A row from the `quests` table. `requirements` holds a JSONB map of named
/// goals (see [`sephirots_core::quests::Goal`]).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quest {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub kind: String,
    pub requirements: serde_json::Value,
    pub points: i32,
    pub badge_reward_id: Option<DbId>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A row from the `user_quests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserQuest {
    pub id: DbId,
    pub user_id: DbId,
    pub quest_id: DbId,
    pub progress: serde_json::Value,
    pub status: String,
    pub completed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

/// A quest joined with the current user's progress row (absent when the
/// user has not started it).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestWithProgress {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub kind: String,
    pub requirements: serde_json::Value,
    pub points: i32,
    pub badge_reward_id: Option<DbId>,
    pub progress: Option<serde_json::Value>,
    pub status: Option<String>,
    pub completed_at: Option<Timestamp>,
}

/// DTO for reporting progress on a quest.
#[derive(Debug, Deserialize)]
pub struct ReportProgress {
    /// Map of goal name to current boolean/number value.
    pub progress: serde_json::Value,
}
