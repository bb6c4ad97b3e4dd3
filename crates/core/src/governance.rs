//! Governance tallying for proposals, amendments, and polls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Status enums
// ---------------------------------------------------------------------------

/// Lifecycle status of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Draft,
    Active,
    Passed,
    Rejected,
    Implemented,
}

impl ProposalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProposalStatus::Draft => "draft",
            ProposalStatus::Active => "active",
            ProposalStatus::Passed => "passed",
            ProposalStatus::Rejected => "rejected",
            ProposalStatus::Implemented => "implemented",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProposalStatus::Draft),
            "active" => Ok(ProposalStatus::Active),
            "passed" => Ok(ProposalStatus::Passed),
            "rejected" => Ok(ProposalStatus::Rejected),
            "implemented" => Ok(ProposalStatus::Implemented),
            other => Err(CoreError::Validation(format!(
                "Unknown proposal status '{other}'"
            ))),
        }
    }
}

/// Lifecycle status of an amendment to a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmendmentStatus {
    Proposed,
    Approved,
    Rejected,
}

impl AmendmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AmendmentStatus::Proposed => "proposed",
            AmendmentStatus::Approved => "approved",
            AmendmentStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for AmendmentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proposed" => Ok(AmendmentStatus::Proposed),
            "approved" => Ok(AmendmentStatus::Approved),
            "rejected" => Ok(AmendmentStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown amendment status '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tallying
// ---------------------------------------------------------------------------

/// Outcome of tallying an active proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalOutcome {
    /// Voting is still open: quorum not reached and the window has not closed.
    Pending,
    Passed,
    Rejected,
}

/// Tally a proposal's votes against its quorum and voting window.
///
/// The proposal stays pending while total votes are below `votes_required`
/// and `now` is before `ends_at`. Once quorum is reached or the window has
/// closed, it passes only with a strict majority in favour; everything else
/// (including a tie, or a closed window without quorum) rejects.
pub fn tally(
    votes_for: i64,
    votes_against: i64,
    votes_required: i64,
    now: Timestamp,
    ends_at: Timestamp,
) -> ProposalOutcome {
    let total = votes_for + votes_against;
    let quorum_reached = total >= votes_required;
    let window_closed = now >= ends_at;

    if !quorum_reached && !window_closed {
        return ProposalOutcome::Pending;
    }

    if quorum_reached && votes_for > votes_against {
        ProposalOutcome::Passed
    } else {
        ProposalOutcome::Rejected
    }
}

/// Winning option index of a poll, given per-option vote counts.
///
/// Returns `None` for a poll with no options; the first option wins a tie.
pub fn poll_winner(counts: &[i64]) -> Option<usize> {
    counts
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.cmp(b).then(ib.cmp(ia)))
        .map(|(i, _)| i)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
