//! Cosmic reaction models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sephirots_core::types::DbId;

/// DTO for toggling a reaction.
#[derive(Debug, Deserialize)]
pub struct ToggleReaction {
    pub content_type: String,
    pub content_id: DbId,
    pub emoji_id: String,
}

/// Authoritative outcome of a toggle: exactly one of added/removed is true,
/// and `count` is the post-toggle total for the (content, emoji) pair.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleOutcome {
    pub added: bool,
    pub removed: bool,
    pub count: i64,
}

/// Per-emoji reaction summary for a piece of content.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReactionCount {
    pub emoji_id: String,
    pub count: i64,
    /// Whether the requesting user has this reaction active.
    pub has_reacted: bool,
}
