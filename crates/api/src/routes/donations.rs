//! Route definitions for the `/donations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::donations;
use crate::state::AppState;

/// Routes mounted at `/donations`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(donations::my_donations))
        .route("/tiers", get(donations::tiers))
        .route("/checkout", post(donations::checkout))
        .route("/webhook", post(donations::webhook))
}
