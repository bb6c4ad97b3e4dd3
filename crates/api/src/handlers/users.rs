//! Handlers for the `/users` resource (profiles, earned badges, points).

use axum::extract::{Path, State};
use axum::Json;
use sephirots_core::badges::{highest_tier, BadgeTier};
use sephirots_core::error::CoreError;
use sephirots_core::rewards::{tier_standing, TierStanding};
use sephirots_core::types::DbId;
use sephirots_db::models::badge::EarnedBadge;
use sephirots_db::models::user::{PublicUser, User};
use sephirots_db::repositories::{BadgeRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A user's earned badges plus their highest tier.
#[derive(Debug, Serialize)]
pub struct UserBadgesResponse {
    pub badges: Vec<EarnedBadge>,
    /// Highest tier across all earned badges (`bronze` for none).
    pub highest_tier: &'static str,
}

/// A user's points balance and tier standing.
#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub points: i64,
    pub standing: TierStanding,
}

/// GET /api/v1/users/me
///
/// The authenticated user's full profile (password hash is never serialized).
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: auth_user.user_id,
        }))?;
    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/users/{id}
///
/// Public view of any user.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<PublicUser>>> {
    let user = UserRepo::find_public(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: user_id,
        }))?;
    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/users/{id}/badges
///
/// A user's earned badges, newest first, with the highest tier attained.
pub async fn user_badges(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserBadgesResponse>>> {
    let badges = BadgeRepo::list_for_user(&state.pool, user_id).await?;

    let tiers: Vec<BadgeTier> = badges
        .iter()
        .filter_map(|b| b.tier.parse::<BadgeTier>().ok())
        .collect();

    Ok(Json(DataResponse {
        data: UserBadgesResponse {
            highest_tier: highest_tier(&tiers).as_str(),
            badges,
        },
    }))
}

/// GET /api/v1/users/me/points
///
/// The authenticated user's points balance and tier standing.
pub async fn my_points(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<PointsResponse>>> {
    points_response(&state, auth_user.user_id).await
}

/// GET /api/v1/users/{id}/points
///
/// Any user's points balance and tier standing. Points are public, like the
/// rest of the public profile.
pub async fn user_points(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<PointsResponse>>> {
    points_response(&state, user_id).await
}

async fn points_response(
    state: &AppState,
    user_id: DbId,
) -> AppResult<Json<DataResponse<PointsResponse>>> {
    let points = UserRepo::points(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: user_id,
        }))?;

    Ok(Json(DataResponse {
        data: PointsResponse {
            points,
            standing: tier_standing(points),
        },
    }))
}
