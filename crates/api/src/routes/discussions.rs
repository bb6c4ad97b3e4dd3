//! Route definitions for the `/discussions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::discussions;
use crate::state::AppState;

/// Routes mounted at `/discussions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(discussions::list_discussions).post(discussions::create_discussion),
        )
        .route("/{id}", get(discussions::get_discussion))
}
