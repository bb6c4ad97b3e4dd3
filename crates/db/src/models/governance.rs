//! Proposal, vote, and amendment models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sephirots_core::types::{DbId, Timestamp};

/// A row from the `proposals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Proposal {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub proposer_id: DbId,
    pub status: String,
    pub votes_for: i64,
    pub votes_against: i64,
    pub votes_required: i64,
    pub ends_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for creating a proposal.
#[derive(Debug, Deserialize)]
pub struct CreateProposal {
    pub title: String,
    pub description: String,
    pub votes_required: Option<i64>,
    pub ends_at: Timestamp,
}

/// A row from the `proposal_votes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProposalVote {
    pub id: DbId,
    pub proposal_id: DbId,
    pub user_id: DbId,
    pub vote: bool,
    pub reason: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for casting a vote on a proposal.
#[derive(Debug, Deserialize)]
pub struct CastVote {
    pub vote: bool,
    pub reason: Option<String>,
}

/// A row from the `amendments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Amendment {
    pub id: DbId,
    pub proposal_id: DbId,
    pub proposer_id: DbId,
    pub content: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for proposing an amendment.
#[derive(Debug, Deserialize)]
pub struct CreateAmendment {
    pub content: String,
}
