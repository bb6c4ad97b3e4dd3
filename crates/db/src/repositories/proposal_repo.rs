//! Repository for the `proposals`, `proposal_votes`, and `amendments` tables.

use sqlx::PgPool;

use sephirots_core::types::DbId;

use crate::models::governance::{
    Amendment, CreateAmendment, CreateProposal, Proposal, ProposalVote,
};

/// Column list for `proposals` queries.
const COLUMNS: &str = "id, title, description, proposer_id, status, votes_for, votes_against, \
                       votes_required, ends_at, created_at";

/// Provides governance operations for proposals.
pub struct ProposalRepo;

impl ProposalRepo {
    /// Create a proposal in `draft` status.
    pub async fn create(
        pool: &PgPool,
        proposer_id: DbId,
        input: &CreateProposal,
    ) -> Result<Proposal, sqlx::Error> {
        let query = format!(
            "INSERT INTO proposals (title, description, proposer_id, votes_required, ends_at) \
             VALUES ($1, $2, $3, COALESCE($4, 10), $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(proposer_id)
            .bind(input.votes_required)
            .bind(input.ends_at)
            .fetch_one(pool)
            .await
    }

    /// List proposals, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<Proposal>, sqlx::Error> {
        let filter = if status.is_some() {
            "WHERE status = $1"
        } else {
            "WHERE $1::text IS NULL"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM proposals {filter} ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Find a proposal by id.
    pub async fn find_by_id(
        pool: &PgPool,
        proposal_id: DbId,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM proposals WHERE id = $1");
        sqlx::query_as::<_, Proposal>(&query)
            .bind(proposal_id)
            .fetch_optional(pool)
            .await
    }

    /// Record a vote and bump the proposal tally in one transaction.
    ///
    /// The unique constraint on (proposal_id, user_id) makes a second vote
    /// from the same user fail with a 23505, which the API layer maps to a
    /// 409; the tally update never runs in that case.
    pub async fn record_vote(
        pool: &PgPool,
        proposal_id: DbId,
        user_id: DbId,
        vote: bool,
        reason: Option<&str>,
    ) -> Result<Proposal, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO proposal_votes (proposal_id, user_id, vote, reason) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(proposal_id)
        .bind(user_id)
        .bind(vote)
        .bind(reason)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE proposals \
             SET votes_for = votes_for + CASE WHEN $2 THEN 1 ELSE 0 END, \
                 votes_against = votes_against + CASE WHEN $2 THEN 0 ELSE 1 END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let proposal = sqlx::query_as::<_, Proposal>(&query)
            .bind(proposal_id)
            .bind(vote)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(proposal)
    }

    /// List a proposal's individual votes.
    pub async fn votes(pool: &PgPool, proposal_id: DbId) -> Result<Vec<ProposalVote>, sqlx::Error> {
        sqlx::query_as::<_, ProposalVote>(
            "SELECT id, proposal_id, user_id, vote, reason, created_at \
             FROM proposal_votes \
             WHERE proposal_id = $1 \
             ORDER BY created_at",
        )
        .bind(proposal_id)
        .fetch_all(pool)
        .await
    }

    /// Update a proposal's status. Returns `true` if a row was updated.
    pub async fn set_status(
        pool: &PgPool,
        proposal_id: DbId,
        status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE proposals SET status = $2 WHERE id = $1")
            .bind(proposal_id)
            .bind(status)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- amendments ----------------------------------------------------------

    /// Propose an amendment to a proposal.
    pub async fn create_amendment(
        pool: &PgPool,
        proposal_id: DbId,
        proposer_id: DbId,
        input: &CreateAmendment,
    ) -> Result<Amendment, sqlx::Error> {
        sqlx::query_as::<_, Amendment>(
            "INSERT INTO amendments (proposal_id, proposer_id, content) \
             VALUES ($1, $2, $3) \
             RETURNING id, proposal_id, proposer_id, content, status, created_at",
        )
        .bind(proposal_id)
        .bind(proposer_id)
        .bind(&input.content)
        .fetch_one(pool)
        .await
    }

    /// List a proposal's amendments, oldest first.
    pub async fn amendments(
        pool: &PgPool,
        proposal_id: DbId,
    ) -> Result<Vec<Amendment>, sqlx::Error> {
        sqlx::query_as::<_, Amendment>(
            "SELECT id, proposal_id, proposer_id, content, status, created_at \
             FROM amendments \
             WHERE proposal_id = $1 \
             ORDER BY created_at",
        )
        .bind(proposal_id)
        .fetch_all(pool)
        .await
    }
}
