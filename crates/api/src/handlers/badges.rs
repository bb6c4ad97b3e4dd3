//! Handlers for the `/badges` resource (catalog and progress).

use axum::extract::State;
use axum::Json;
use sephirots_db::models::badge::{Badge, BadgeProgressItem};
use sephirots_db::repositories::BadgeRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/badges
///
/// The full badge catalog, ordered by level then name.
pub async fn list_badges(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Badge>>>> {
    let badges = BadgeRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: badges }))
}

/// GET /api/v1/badges/progress
///
/// The authenticated user's in-flight badge progress entries.
pub async fn my_badge_progress(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<BadgeProgressItem>>>> {
    let progress = BadgeRepo::progress_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: progress }))
}
