//! Handlers for the `/proposals` resource (community governance).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sephirots_core::error::CoreError;
use sephirots_core::governance::{tally, ProposalOutcome, ProposalStatus};
use sephirots_core::types::DbId;
use sephirots_db::models::governance::{
    Amendment, CastVote, CreateAmendment, CreateProposal, Proposal, ProposalVote,
};
use sephirots_db::repositories::ProposalRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /proposals`.
#[derive(Debug, Deserialize)]
pub struct ProposalListParams {
    pub status: Option<String>,
}

/// A proposal together with its individual votes and amendments.
#[derive(Debug, Serialize)]
pub struct ProposalDetail {
    #[serde(flatten)]
    pub proposal: Proposal,
    pub votes: Vec<ProposalVote>,
    pub amendments: Vec<Amendment>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/proposals
///
/// Create a proposal in draft status.
pub async fn create_proposal(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateProposal>,
) -> AppResult<(StatusCode, Json<DataResponse<Proposal>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".into(),
        )));
    }
    if input.ends_at <= Utc::now() {
        return Err(AppError::Core(CoreError::Validation(
            "Voting window must end in the future".into(),
        )));
    }
    if input.votes_required.is_some_and(|v| v <= 0) {
        return Err(AppError::Core(CoreError::Validation(
            "votes_required must be positive".into(),
        )));
    }

    let proposal = ProposalRepo::create(&state.pool, auth_user.user_id, &input).await?;

    tracing::info!(
        user_id = auth_user.user_id,
        proposal_id = proposal.id,
        "Proposal created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: proposal })))
}

/// GET /api/v1/proposals
///
/// List proposals, newest first, optionally filtered by `?status=`.
pub async fn list_proposals(
    State(state): State<AppState>,
    Query(params): Query<ProposalListParams>,
) -> AppResult<Json<DataResponse<Vec<Proposal>>>> {
    if let Some(status) = &params.status {
        // Reject unknown status filters instead of silently matching nothing.
        status.parse::<ProposalStatus>()?;
    }
    let proposals = ProposalRepo::list(&state.pool, params.status.as_deref()).await?;
    Ok(Json(DataResponse { data: proposals }))
}

/// GET /api/v1/proposals/{id}
///
/// One proposal with its votes and amendments.
pub async fn get_proposal(
    State(state): State<AppState>,
    Path(proposal_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProposalDetail>>> {
    let proposal = find_proposal(&state, proposal_id).await?;
    let votes = ProposalRepo::votes(&state.pool, proposal_id).await?;
    let amendments = ProposalRepo::amendments(&state.pool, proposal_id).await?;

    Ok(Json(DataResponse {
        data: ProposalDetail {
            proposal,
            votes,
            amendments,
        },
    }))
}

/// POST /api/v1/proposals/{id}/activate
///
/// Open a draft proposal for voting. Only the proposer or an admin may
/// activate, and only from draft status.
pub async fn activate_proposal(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(proposal_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Proposal>>> {
    let proposal = find_proposal(&state, proposal_id).await?;

    if proposal.proposer_id != auth_user.user_id && auth_user.role != "admin" {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the proposer or an admin can activate a proposal".into(),
        )));
    }
    if proposal.status != ProposalStatus::Draft.as_str() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Proposal is {} and cannot be activated",
            proposal.status
        ))));
    }

    ProposalRepo::set_status(&state.pool, proposal_id, ProposalStatus::Active.as_str()).await?;
    let activated = find_proposal(&state, proposal_id).await?;

    tracing::info!(proposal_id, "Proposal activated");
    Ok(Json(DataResponse { data: activated }))
}

/// POST /api/v1/proposals/{id}/vote
///
/// Cast a vote on an active proposal. One vote per user (a second vote is a
/// 409 via the unique constraint). When the updated tally reaches a
/// decision, the proposal transitions to passed or rejected.
pub async fn vote(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(proposal_id): Path<DbId>,
    Json(input): Json<CastVote>,
) -> AppResult<Json<DataResponse<Proposal>>> {
    let proposal = find_proposal(&state, proposal_id).await?;

    if proposal.status != ProposalStatus::Active.as_str() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Proposal is {} and cannot be voted on",
            proposal.status
        ))));
    }
    if Utc::now() >= proposal.ends_at {
        return Err(AppError::Core(CoreError::Conflict(
            "Voting window has closed".into(),
        )));
    }

    let updated = ProposalRepo::record_vote(
        &state.pool,
        proposal_id,
        auth_user.user_id,
        input.vote,
        input.reason.as_deref(),
    )
    .await?;

    let outcome = tally(
        updated.votes_for,
        updated.votes_against,
        updated.votes_required,
        Utc::now(),
        updated.ends_at,
    );

    let final_proposal = match outcome {
        ProposalOutcome::Pending => updated,
        ProposalOutcome::Passed => {
            ProposalRepo::set_status(&state.pool, proposal_id, ProposalStatus::Passed.as_str())
                .await?;
            tracing::info!(proposal_id, "Proposal passed");
            find_proposal(&state, proposal_id).await?
        }
        ProposalOutcome::Rejected => {
            ProposalRepo::set_status(&state.pool, proposal_id, ProposalStatus::Rejected.as_str())
                .await?;
            tracing::info!(proposal_id, "Proposal rejected");
            find_proposal(&state, proposal_id).await?
        }
    };

    Ok(Json(DataResponse {
        data: final_proposal,
    }))
}

/// POST /api/v1/proposals/{id}/amendments
///
/// Propose an amendment to an existing proposal.
pub async fn create_amendment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(proposal_id): Path<DbId>,
    Json(input): Json<CreateAmendment>,
) -> AppResult<(StatusCode, Json<DataResponse<Amendment>>)> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Amendment content must not be empty".into(),
        )));
    }

    // 404 before insert so a missing proposal is not a foreign-key 500.
    find_proposal(&state, proposal_id).await?;

    let amendment =
        ProposalRepo::create_amendment(&state.pool, proposal_id, auth_user.user_id, &input).await?;

    tracing::info!(
        user_id = auth_user.user_id,
        proposal_id,
        amendment_id = amendment.id,
        "Amendment proposed"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: amendment })))
}

/// GET /api/v1/proposals/{id}/amendments
///
/// Amendments proposed against one proposal, oldest first.
pub async fn list_amendments(
    State(state): State<AppState>,
    Path(proposal_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Amendment>>>> {
    find_proposal(&state, proposal_id).await?;
    let amendments = ProposalRepo::amendments(&state.pool, proposal_id).await?;
    Ok(Json(DataResponse { data: amendments }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_proposal(state: &AppState, proposal_id: DbId) -> AppResult<Proposal> {
    ProposalRepo::find_by_id(&state.pool, proposal_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "proposal",
            id: proposal_id,
        }))
}
