//! Route definitions for the `/quests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::quests;
use crate::state::AppState;

/// Routes mounted at `/quests`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quests::list_quests))
        .route("/{id}", get(quests::get_quest))
        .route("/{id}/progress", post(quests::report_progress))
        .route("/{id}/complete", post(quests::complete_quest))
}
