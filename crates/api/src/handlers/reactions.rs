//! Handlers for the `/reactions` resource (cosmic reaction toggles).

use axum::extract::{Path, State};
use axum::Json;
use sephirots_core::reactions::{validate_content_type, validate_emoji};
use sephirots_core::types::DbId;
use sephirots_db::models::reaction::{ReactionCount, ToggleOutcome, ToggleReaction};
use sephirots_db::repositories::ReactionRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/cosmic-reactions/toggle
///
/// Toggle a reaction on or off for the authenticated user. Repeated calls
/// alternate strictly between added and removed.
pub async fn toggle(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ToggleReaction>,
) -> AppResult<Json<DataResponse<ToggleOutcome>>> {
    validate_content_type(&input.content_type)?;
    validate_emoji(&input.emoji_id)?;

    let outcome = ReactionRepo::toggle(
        &state.pool,
        &input.content_type,
        input.content_id,
        auth_user.user_id,
        &input.emoji_id,
    )
    .await?;

    tracing::info!(
        user_id = auth_user.user_id,
        content_type = %input.content_type,
        content_id = input.content_id,
        emoji_id = %input.emoji_id,
        added = outcome.added,
        "Reaction toggled"
    );

    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/cosmic-reactions/{content_type}/{content_id}
///
/// Per-emoji reaction counts for a piece of content, with the requesting
/// user's has-reacted flag on each.
pub async fn counts(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((content_type, content_id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<Vec<ReactionCount>>>> {
    validate_content_type(&content_type)?;

    let counts =
        ReactionRepo::counts_for_content(&state.pool, &content_type, content_id, auth_user.user_id)
            .await?;
    Ok(Json(DataResponse { data: counts }))
}
