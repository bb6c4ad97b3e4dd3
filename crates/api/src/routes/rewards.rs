//! Route definitions for the `/rewards` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::rewards;
use crate::state::AppState;

/// Routes mounted at `/rewards`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rewards::list_rewards))
        .route("/{id}/redeem", post(rewards::redeem_reward))
}
