//! Route definitions for the `/polls` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::polls;
use crate::state::AppState;

/// Routes mounted at `/polls`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(polls::list_polls).post(polls::create_poll))
        .route("/{id}/vote", post(polls::vote))
        .route("/{id}/results", get(polls::results))
}
