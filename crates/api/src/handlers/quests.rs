//! Handlers for the `/quests` resource (listing, progress reporting, completion).

use axum::extract::{Path, State};
use axum::Json;
use sephirots_core::error::CoreError;
use sephirots_core::quests::{evaluate, GoalMap, ProgressMap, QuestEvaluation};
use sephirots_core::types::DbId;
use sephirots_db::models::quest::{QuestWithProgress, ReportProgress};
use sephirots_db::repositories::{BadgeRepo, QuestRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A quest joined with the user's progress and its evaluation.
#[derive(Debug, Serialize)]
pub struct QuestView {
    #[serde(flatten)]
    pub quest: QuestWithProgress,
    pub evaluation: QuestEvaluation,
}

/// Result of completing a quest.
#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    pub quest_id: DbId,
    pub points_awarded: i64,
    pub points_balance: i64,
    /// Id of the badge awarded by this quest, if it has one and it was new.
    pub badge_awarded: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/quests
///
/// Currently-open quests with the authenticated user's progress and a
/// per-quest evaluation (satisfied goals, percentage, completeness).
pub async fn list_quests(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<QuestView>>>> {
    let quests = QuestRepo::list_for_user(&state.pool, auth_user.user_id).await?;

    let views = quests
        .into_iter()
        .map(|quest| {
            // Malformed requirement rows evaluate as empty (0%, never complete).
            let requirements: GoalMap =
                serde_json::from_value(quest.requirements.clone()).unwrap_or_default();
            let progress: ProgressMap = quest
                .progress
                .clone()
                .and_then(|p| serde_json::from_value(p).ok())
                .unwrap_or_default();
            let evaluation = evaluate(&requirements, &progress);
            QuestView { quest, evaluation }
        })
        .collect();

    Ok(Json(DataResponse { data: views }))
}

/// GET /api/v1/quests/{id}
///
/// One quest with the authenticated user's progress and evaluation.
pub async fn get_quest(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(quest_id): Path<DbId>,
) -> AppResult<Json<DataResponse<QuestView>>> {
    let quest = QuestRepo::find_for_user(&state.pool, auth_user.user_id, quest_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "quest",
            id: quest_id,
        }))?;

    let requirements: GoalMap =
        serde_json::from_value(quest.requirements.clone()).unwrap_or_default();
    let progress: ProgressMap = quest
        .progress
        .clone()
        .and_then(|p| serde_json::from_value(p).ok())
        .unwrap_or_default();
    let evaluation = evaluate(&requirements, &progress);

    Ok(Json(DataResponse {
        data: QuestView { quest, evaluation },
    }))
}

/// POST /api/v1/quests/{id}/progress
///
/// Merge reported progress into the user's progress map and return the new
/// evaluation. Reporting against a completed quest is a 409.
pub async fn report_progress(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(quest_id): Path<DbId>,
    Json(input): Json<ReportProgress>,
) -> AppResult<Json<DataResponse<QuestEvaluation>>> {
    // The body must be a valid progress map before anything is persisted.
    let _: ProgressMap = serde_json::from_value(input.progress.clone())
        .map_err(|e| AppError::Core(CoreError::Validation(format!("Invalid progress: {e}"))))?;

    let quest = QuestRepo::find_by_id(&state.pool, quest_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "quest",
            id: quest_id,
        }))?;

    let user_quest =
        QuestRepo::merge_progress(&state.pool, auth_user.user_id, quest_id, &input.progress)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Conflict("Quest is already completed".into()))
            })?;

    let requirements: GoalMap =
        serde_json::from_value(quest.requirements.clone()).unwrap_or_default();
    let progress: ProgressMap =
        serde_json::from_value(user_quest.progress.clone()).unwrap_or_default();
    let evaluation = evaluate(&requirements, &progress);

    tracing::info!(
        user_id = auth_user.user_id,
        quest_id,
        percentage = evaluation.percentage,
        "Quest progress reported"
    );

    Ok(Json(DataResponse { data: evaluation }))
}

/// POST /api/v1/quests/{id}/complete
///
/// Claim a quest whose goals are all satisfied. Awards the quest's points
/// (and badge, if any) exactly once; a second claim is a 409.
pub async fn complete_quest(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(quest_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CompleteResponse>>> {
    let quest = QuestRepo::find_by_id(&state.pool, quest_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "quest",
            id: quest_id,
        }))?;

    let user_quest = QuestRepo::user_quest(&state.pool, auth_user.user_id, quest_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "No progress recorded for this quest".into(),
            ))
        })?;

    let requirements: GoalMap =
        serde_json::from_value(quest.requirements.clone()).unwrap_or_default();
    let progress: ProgressMap =
        serde_json::from_value(user_quest.progress.clone()).unwrap_or_default();
    let evaluation = evaluate(&requirements, &progress);

    if !evaluation.complete {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Quest is not complete: {}/{} goals satisfied",
            evaluation.satisfied, evaluation.total
        ))));
    }

    // The guarded transition makes the award happen at most once even under
    // concurrent claims.
    let transitioned = QuestRepo::mark_completed(&state.pool, auth_user.user_id, quest_id).await?;
    if !transitioned {
        return Err(AppError::Core(CoreError::Conflict(
            "Quest is already completed".into(),
        )));
    }

    let points_awarded = i64::from(quest.points);
    let points_balance = UserRepo::add_points(&state.pool, auth_user.user_id, points_awarded).await?;

    let badge_awarded = match quest.badge_reward_id {
        Some(badge_id) => BadgeRepo::award(&state.pool, auth_user.user_id, badge_id)
            .await?
            .then_some(badge_id),
        None => None,
    };

    tracing::info!(
        user_id = auth_user.user_id,
        quest_id,
        points_awarded,
        ?badge_awarded,
        "Quest completed"
    );

    Ok(Json(DataResponse {
        data: CompleteResponse {
            quest_id,
            points_awarded,
            points_balance,
            badge_awarded,
        },
    }))
}
