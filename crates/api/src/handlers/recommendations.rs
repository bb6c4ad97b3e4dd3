//! Handlers for the `/recommendations` resource.
//!
//! All recommendations derive from the user's spiritual profile, which is
//! itself derived from the text of their earned badges. The discussion
//! scorer takes an optional `?seed=` query parameter so its perturbation is
//! reproducible on demand.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sephirots_core::resonance::{
    daily_insight, derive_profile, score_discussions, score_practices, BadgeText,
    DiscussionSummary, ScoredDiscussion, ScoredPractice, SpiritualProfile,
};
use sephirots_core::types::DbId;
use sephirots_db::repositories::{BadgeRepo, DiscussionRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default number of practice recommendations.
const DEFAULT_PRACTICE_COUNT: usize = 3;

/// Number of recent discussions considered by the discussion scorer.
const DISCUSSION_POOL_SIZE: i64 = 20;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /recommendations/practices`.
#[derive(Debug, Deserialize)]
pub struct PracticeParams {
    pub limit: Option<usize>,
}

/// Query parameters for `GET /recommendations/discussions`.
#[derive(Debug, Deserialize)]
pub struct DiscussionParams {
    /// Optional RNG seed for a reproducible perturbation.
    pub seed: Option<u64>,
}

/// The daily insight with the date it was selected for.
#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub date: chrono::NaiveDate,
    pub insight: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/recommendations/profile
///
/// The authenticated user's spiritual profile, derived from earned badges.
pub async fn my_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<SpiritualProfile>>> {
    let profile = load_profile(&state, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/recommendations/practices
///
/// Top practices scored against the user's profile.
pub async fn practices(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PracticeParams>,
) -> AppResult<Json<DataResponse<Vec<ScoredPractice>>>> {
    let profile = load_profile(&state, auth_user.user_id).await?;
    let limit = params.limit.unwrap_or(DEFAULT_PRACTICE_COUNT);
    Ok(Json(DataResponse {
        data: score_practices(&profile, limit),
    }))
}

/// GET /api/v1/recommendations/discussions
///
/// The top two recent discussions scored against the user's profile, with
/// a small random perturbation for variety.
pub async fn discussions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<DiscussionParams>,
) -> AppResult<Json<DataResponse<Vec<ScoredDiscussion>>>> {
    let profile = load_profile(&state, auth_user.user_id).await?;

    let recent = DiscussionRepo::list_recent(&state.pool, DISCUSSION_POOL_SIZE).await?;
    let summaries: Vec<DiscussionSummary> = recent
        .into_iter()
        .map(|d| DiscussionSummary {
            id: d.id,
            title: d.title,
            tags: d.tags,
        })
        .collect();

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    Ok(Json(DataResponse {
        data: score_discussions(&profile, &summaries, &mut rng),
    }))
}

/// GET /api/v1/recommendations/daily-insight
///
/// Today's insight, deterministic per date and profile.
pub async fn insight(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<InsightResponse>>> {
    let profile = load_profile(&state, auth_user.user_id).await?;
    let today = Utc::now().date_naive();
    Ok(Json(DataResponse {
        data: InsightResponse {
            date: today,
            insight: daily_insight(today, &profile),
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Derive the spiritual profile from a user's earned badges.
async fn load_profile(state: &AppState, user_id: DbId) -> AppResult<SpiritualProfile> {
    let badges = BadgeRepo::list_for_user(&state.pool, user_id).await?;
    let texts: Vec<BadgeText> = badges
        .into_iter()
        .map(|b| BadgeText {
            name: b.name,
            description: b.description,
        })
        .collect();
    Ok(derive_profile(&texts))
}
