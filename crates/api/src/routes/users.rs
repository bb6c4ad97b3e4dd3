//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::me))
        .route("/me/points", get(users::my_points))
        .route("/{id}", get(users::get_user))
        .route("/{id}/points", get(users::user_points))
        .route("/{id}/badges", get(users::user_badges))
}
