//! Handlers for the `/discussions` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sephirots_core::error::CoreError;
use sephirots_core::types::DbId;
use sephirots_db::models::discussion::{CreateDiscussion, Discussion, DiscussionListParams};
use sephirots_db::repositories::DiscussionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/discussions
///
/// Start a new discussion thread.
pub async fn create_discussion(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateDiscussion>,
) -> AppResult<(StatusCode, Json<DataResponse<Discussion>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".into(),
        )));
    }
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Content must not be empty".into(),
        )));
    }

    let discussion = DiscussionRepo::create(&state.pool, auth_user.user_id, &input).await?;

    tracing::info!(
        user_id = auth_user.user_id,
        discussion_id = discussion.id,
        category = %discussion.category,
        "Discussion created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: discussion })))
}

/// GET /api/v1/discussions
///
/// List discussions, newest first, optionally filtered by `?category=`.
pub async fn list_discussions(
    State(state): State<AppState>,
    Query(params): Query<DiscussionListParams>,
) -> AppResult<Json<DataResponse<Vec<Discussion>>>> {
    let discussions = DiscussionRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: discussions }))
}

/// GET /api/v1/discussions/{id}
///
/// Fetch one discussion, incrementing its view counter.
pub async fn get_discussion(
    State(state): State<AppState>,
    Path(discussion_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Discussion>>> {
    let discussion = DiscussionRepo::find_and_view(&state.pool, discussion_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "discussion",
            id: discussion_id,
        }))?;
    Ok(Json(DataResponse { data: discussion }))
}
