//! Handlers for the `/rewards` resource (catalog and redemption).

use axum::extract::{Path, State};
use axum::Json;
use sephirots_core::error::CoreError;
use sephirots_core::rewards::{can_afford, points_needed};
use sephirots_core::types::DbId;
use sephirots_db::models::reward::{RedeemOutcome, Reward};
use sephirots_db::repositories::{RewardRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A catalog reward annotated with the requesting user's affordability.
#[derive(Debug, Serialize)]
pub struct RewardView {
    #[serde(flatten)]
    pub reward: Reward,
    pub affordable: bool,
    /// Points still missing to afford this reward (zero when affordable).
    pub points_needed: i64,
}

/// Result of a successful redemption.
#[derive(Debug, Serialize)]
pub struct RedeemResponse {
    pub reward_id: DbId,
    pub points_spent: i64,
    pub points_remaining: i64,
}

/// GET /api/v1/rewards
///
/// The reward catalog, cheapest first, annotated with the authenticated
/// user's affordability.
pub async fn list_rewards(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<RewardView>>>> {
    let points = UserRepo::points(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: auth_user.user_id,
        }))?;

    let rewards = RewardRepo::list_all(&state.pool).await?;
    let views = rewards
        .into_iter()
        .map(|reward| RewardView {
            affordable: can_afford(points, reward.points_cost),
            points_needed: points_needed(points, reward.points_cost),
            reward,
        })
        .collect();

    Ok(Json(DataResponse { data: views }))
}

/// POST /api/v1/rewards/{id}/redeem
///
/// Spend points on a reward. Insufficient points and exhausted supply are
/// both 409s; the balance and supply decrements are atomic, so neither can
/// go negative under concurrent redemptions.
pub async fn redeem_reward(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(reward_id): Path<DbId>,
) -> AppResult<Json<DataResponse<RedeemResponse>>> {
    let reward = RewardRepo::find_by_id(&state.pool, reward_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "reward",
            id: reward_id,
        }))?;

    match RewardRepo::redeem(&state.pool, auth_user.user_id, &reward).await? {
        RedeemOutcome::Redeemed { points_remaining } => {
            tracing::info!(
                user_id = auth_user.user_id,
                reward_id,
                points_spent = reward.points_cost,
                points_remaining,
                "Reward redeemed"
            );
            Ok(Json(DataResponse {
                data: RedeemResponse {
                    reward_id,
                    points_spent: reward.points_cost,
                    points_remaining,
                },
            }))
        }
        RedeemOutcome::InsufficientPoints { points } => {
            Err(AppError::Core(CoreError::Conflict(format!(
                "Insufficient points: have {points}, need {}",
                reward.points_cost
            ))))
        }
        RedeemOutcome::SoldOut => Err(AppError::Core(CoreError::Conflict(
            "Reward is sold out".into(),
        ))),
    }
}
