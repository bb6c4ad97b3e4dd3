//! Route definitions for the `/proposals` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::proposals;
use crate::state::AppState;

/// Routes mounted at `/proposals`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(proposals::list_proposals).post(proposals::create_proposal),
        )
        .route("/{id}", get(proposals::get_proposal))
        .route("/{id}/activate", post(proposals::activate_proposal))
        .route("/{id}/vote", post(proposals::vote))
        .route(
            "/{id}/amendments",
            get(proposals::list_amendments).post(proposals::create_amendment),
        )
}
