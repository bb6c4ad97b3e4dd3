//! Handlers for the `/polls` resource (community polls).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sephirots_core::error::CoreError;
use sephirots_core::governance::poll_winner;
use sephirots_core::types::DbId;
use sephirots_db::models::poll::{CastPollVote, CreatePoll, Poll, PollResults};
use sephirots_db::repositories::PollRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/polls
///
/// Create a poll with at least two options.
pub async fn create_poll(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreatePoll>,
) -> AppResult<(StatusCode, Json<DataResponse<Poll>>)> {
    if input.question.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Question must not be empty".into(),
        )));
    }
    if input.options.len() < 2 {
        return Err(AppError::Core(CoreError::Validation(
            "A poll needs at least two options".into(),
        )));
    }
    if input.closes_at.is_some_and(|t| t <= Utc::now()) {
        return Err(AppError::Core(CoreError::Validation(
            "closes_at must be in the future".into(),
        )));
    }

    let poll = PollRepo::create(&state.pool, auth_user.user_id, &input).await?;

    tracing::info!(user_id = auth_user.user_id, poll_id = poll.id, "Poll created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: poll })))
}

/// GET /api/v1/polls
///
/// List polls, newest first.
pub async fn list_polls(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Poll>>>> {
    let polls = PollRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: polls }))
}

/// POST /api/v1/polls/{id}/vote
///
/// Vote for one option. One vote per user (a second vote is a 409 via the
/// unique constraint); out-of-range option indexes are a 400.
pub async fn vote(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(poll_id): Path<DbId>,
    Json(input): Json<CastPollVote>,
) -> AppResult<StatusCode> {
    let poll = find_poll(&state, poll_id).await?;
    let options = poll_options(&poll)?;

    if input.option_index < 0 || input.option_index as usize >= options.len() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Option index {} is out of range (poll has {} options)",
            input.option_index,
            options.len()
        ))));
    }
    if poll.closes_at.is_some_and(|t| Utc::now() >= t) {
        return Err(AppError::Core(CoreError::Conflict("Poll has closed".into())));
    }

    PollRepo::record_vote(&state.pool, poll_id, auth_user.user_id, input.option_index).await?;

    tracing::info!(
        user_id = auth_user.user_id,
        poll_id,
        option_index = input.option_index,
        "Poll vote recorded"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/polls/{id}/results
///
/// Per-option counts and the current winner (first option wins ties).
pub async fn results(
    State(state): State<AppState>,
    Path(poll_id): Path<DbId>,
) -> AppResult<Json<DataResponse<PollResults>>> {
    let poll = find_poll(&state, poll_id).await?;
    let options = poll_options(&poll)?;

    let counts = PollRepo::vote_counts(&state.pool, poll_id, options.len()).await?;
    let winner = poll_winner(&counts);

    Ok(Json(DataResponse {
        data: PollResults {
            poll_id,
            question: poll.question,
            options,
            counts,
            winner,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_poll(state: &AppState, poll_id: DbId) -> AppResult<Poll> {
    PollRepo::find_by_id(&state.pool, poll_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "poll",
            id: poll_id,
        }))
}

/// Decode the JSONB options column into a string list.
fn poll_options(poll: &Poll) -> AppResult<Vec<String>> {
    serde_json::from_value(poll.options.clone())
        .map_err(|e| AppError::InternalError(format!("Corrupt poll options: {e}")))
}
