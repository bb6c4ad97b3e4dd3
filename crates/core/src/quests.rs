//! Quest goal evaluation.
//!
//! A quest is a set of named goals. Each goal is independently either
//! satisfied or not (no partial credit inside a single goal); the quest's
//! completion percentage is the share of satisfied goals. A quest is
//! complete only when every goal is satisfied.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Quest kinds and statuses
// ---------------------------------------------------------------------------

/// The cadence / category of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestKind {
    Daily,
    Weekly,
    Onboarding,
    Achievement,
    Special,
}

impl QuestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestKind::Daily => "daily",
            QuestKind::Weekly => "weekly",
            QuestKind::Onboarding => "onboarding",
            QuestKind::Achievement => "achievement",
            QuestKind::Special => "special",
        }
    }
}

impl fmt::Display for QuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(QuestKind::Daily),
            "weekly" => Ok(QuestKind::Weekly),
            "onboarding" => Ok(QuestKind::Onboarding),
            "achievement" => Ok(QuestKind::Achievement),
            "special" => Ok(QuestKind::Special),
            other => Err(CoreError::Validation(format!(
                "Unknown quest kind '{other}'"
            ))),
        }
    }
}

/// Per-user quest status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    NotStarted,
    InProgress,
    Completed,
    Expired,
}

impl QuestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestStatus::NotStarted => "not_started",
            QuestStatus::InProgress => "in_progress",
            QuestStatus::Completed => "completed",
            QuestStatus::Expired => "expired",
        }
    }
}

impl FromStr for QuestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(QuestStatus::NotStarted),
            "in_progress" => Ok(QuestStatus::InProgress),
            "completed" => Ok(QuestStatus::Completed),
            "expired" => Ok(QuestStatus::Expired),
            other => Err(CoreError::Validation(format!(
                "Unknown quest status '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

/// A single named requirement inside a quest.
///
/// Goals are a tagged union so the satisfaction predicate is matched
/// exhaustively instead of being inferred from the runtime type of an
/// untyped JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Goal {
    /// Satisfied when progress reaches or exceeds `target`.
    Reach { target: i64 },
    /// Satisfied when progress equals `target` exactly.
    Flag { target: bool },
}

/// Current progress toward one goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProgressValue {
    Count(i64),
    Flag(bool),
}

/// Requirements keyed by goal name, as stored in the quest's JSONB column.
pub type GoalMap = BTreeMap<String, Goal>;

/// Progress keyed by goal name, as stored per user.
pub type ProgressMap = BTreeMap<String, ProgressValue>;

/// Whether a single goal is satisfied by the given progress value.
///
/// Missing progress counts as zero / false. A progress value of the wrong
/// shape (boolean progress against a numeric goal, or vice versa) is never
/// satisfied.
pub fn goal_satisfied(goal: &Goal, progress: Option<&ProgressValue>) -> bool {
    match (goal, progress) {
        (Goal::Reach { target }, Some(ProgressValue::Count(current))) => current >= target,
        (Goal::Reach { target }, None) => 0 >= *target,
        (Goal::Flag { target }, Some(ProgressValue::Flag(current))) => current == target,
        (Goal::Flag { target }, None) => !*target,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// The outcome of evaluating a quest's progress against its requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestEvaluation {
    /// Number of satisfied goals.
    pub satisfied: usize,
    /// Total number of goals.
    pub total: usize,
    /// Share of satisfied goals, 0..=100 (integer).
    pub percentage: u32,
    /// True when every goal is satisfied and there is at least one goal.
    pub complete: bool,
}

/// Evaluate quest progress against its requirements.
///
/// Each goal contributes 0 or 1 to the satisfied count; the percentage is
/// continuous only across goals, never within one. A quest with no goals
/// evaluates to 0% and is never complete, so malformed quest rows cannot be
/// claimed for free points.
pub fn evaluate(requirements: &GoalMap, progress: &ProgressMap) -> QuestEvaluation {
    let total = requirements.len();
    if total == 0 {
        return QuestEvaluation {
            satisfied: 0,
            total: 0,
            percentage: 0,
            complete: false,
        };
    }

    let satisfied = requirements
        .iter()
        .filter(|(name, goal)| goal_satisfied(goal, progress.get(name.as_str())))
        .count();

    QuestEvaluation {
        satisfied,
        total,
        percentage: (satisfied * 100 / total) as u32,
        complete: satisfied == total,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
