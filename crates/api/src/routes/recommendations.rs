//! Route definitions for the `/recommendations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::recommendations;
use crate::state::AppState;

/// Routes mounted at `/recommendations`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(recommendations::my_profile))
        .route("/practices", get(recommendations::practices))
        .route("/discussions", get(recommendations::discussions))
        .route("/daily-insight", get(recommendations::insight))
}
