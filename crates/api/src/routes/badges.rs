//! Route definitions for the `/badges` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::badges;
use crate::state::AppState;

/// Routes mounted at `/badges`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(badges::list_badges))
        .route("/progress", get(badges::my_badge_progress))
}
