pub mod auth;
pub mod badges;
pub mod discussions;
pub mod donations;
pub mod health;
pub mod polls;
pub mod proposals;
pub mod quests;
pub mod reactions;
pub mod recommendations;
pub mod rewards;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                        register (public)
/// /auth/login                           login (public)
/// /auth/refresh                         refresh (public)
/// /auth/logout                          logout (requires auth)
///
/// /users/me                             authenticated user's profile
/// /users/me/points                      points balance + tier standing
/// /users/{id}                           public user profile
/// /users/{id}/points                    public points + tier standing
/// /users/{id}/badges                    earned badges + highest tier
///
/// /badges                               badge catalog
/// /badges/progress                      authenticated user's badge progress
///
/// /quests                               open quests with progress + evaluation
/// /quests/{id}                          one quest with progress + evaluation
/// /quests/{id}/progress                 report progress (POST)
/// /quests/{id}/complete                 claim a finished quest (POST)
///
/// /rewards                              catalog with affordability
/// /rewards/{id}/redeem                  spend points (POST)
///
/// /discussions                          list, create
/// /discussions/{id}                     get (bumps view counter)
///
/// /proposals                            list, create
/// /proposals/{id}                       get with votes + amendments
/// /proposals/{id}/activate              open for voting (POST)
/// /proposals/{id}/vote                  cast vote (POST)
/// /proposals/{id}/amendments            list, propose amendment
///
/// /polls                                list, create
/// /polls/{id}/vote                      cast vote (POST)
/// /polls/{id}/results                   counts + winner
///
/// /cosmic-reactions/toggle              toggle a reaction (POST)
/// /cosmic-reactions/{content_type}/{id} per-emoji counts
///
/// /recommendations/profile              derived spiritual profile
/// /recommendations/practices            scored practices
/// /recommendations/discussions          scored discussions
/// /recommendations/daily-insight        today's insight
///
/// /donations/tiers                      tier catalog (public)
/// /donations                            donation history
/// /donations/checkout                   start a checkout session (POST)
/// /donations/webhook                    Stripe webhook (POST, signed)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/badges", badges::router())
        .nest("/quests", quests::router())
        .nest("/rewards", rewards::router())
        .nest("/discussions", discussions::router())
        .nest("/proposals", proposals::router())
        .nest("/polls", polls::router())
        .nest("/cosmic-reactions", reactions::router())
        .nest("/recommendations", recommendations::router())
        .nest("/donations", donations::router())
}
