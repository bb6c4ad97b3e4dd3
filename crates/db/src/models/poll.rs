//! Poll models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sephirots_core::types::{DbId, Timestamp};

/// A row from the `polls` table. `options` is a JSON array of option strings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Poll {
    pub id: DbId,
    pub question: String,
    pub options: serde_json::Value,
    pub creator_id: DbId,
    pub closes_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a poll.
#[derive(Debug, Deserialize)]
pub struct CreatePoll {
    pub question: String,
    pub options: Vec<String>,
    pub closes_at: Option<Timestamp>,
}

/// DTO for voting in a poll.
#[derive(Debug, Deserialize)]
pub struct CastPollVote {
    pub option_index: i32,
}

/// Per-option tally for a poll's results view.
#[derive(Debug, Clone, Serialize)]
pub struct PollResults {
    pub poll_id: DbId,
    pub question: String,
    pub options: Vec<String>,
    pub counts: Vec<i64>,
    pub winner: Option<usize>,
}
