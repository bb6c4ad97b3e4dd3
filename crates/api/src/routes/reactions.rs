//! Route definitions for the `/cosmic-reactions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reactions;
use crate::state::AppState;

/// Routes mounted at `/cosmic-reactions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/toggle", post(reactions::toggle))
        .route("/{content_type}/{content_id}", get(reactions::counts))
}
