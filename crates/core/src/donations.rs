//! The donation tier catalog.
//!
//! Each tier carries two explicit price points: a one-time gift amount and a
//! monthly sustaining amount. The original product copy showed different
//! dollar figures for the same tier names on two different pages; keeping
//! both amounts on the tier makes that an explicit choice at checkout
//! instead of an accident of which page the donor came from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Whether a donation is a one-time gift or a monthly commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationKind {
    OneTime,
    Monthly,
}

impl DonationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DonationKind::OneTime => "one_time",
            DonationKind::Monthly => "monthly",
        }
    }
}

impl fmt::Display for DonationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_time" => Ok(DonationKind::OneTime),
            "monthly" => Ok(DonationKind::Monthly),
            other => Err(CoreError::Validation(format!(
                "Unknown donation kind '{other}'"
            ))),
        }
    }
}

/// A supporter tier in the donation catalog.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DonationTier {
    pub slug: &'static str,
    pub name: &'static str,
    /// One-time gift amount in cents.
    pub one_time_cents: i64,
    /// Monthly sustaining amount in cents.
    pub monthly_cents: i64,
    /// Name of the badge awarded on a completed donation at this tier.
    pub badge_name: &'static str,
}

/// The fixed donation tier catalog.
pub const DONATION_TIERS: &[DonationTier] = &[
    DonationTier {
        slug: "seed-planter",
        name: "Seed Planter",
        one_time_cents: 1_500,
        monthly_cents: 300,
        badge_name: "Seed Planter",
    },
    DonationTier {
        slug: "tree-tender",
        name: "Tree Tender",
        one_time_cents: 3_000,
        monthly_cents: 1_000,
        badge_name: "Tree Tender",
    },
    DonationTier {
        slug: "light-guardian",
        name: "Light Guardian",
        one_time_cents: 5_000,
        monthly_cents: 2_500,
        badge_name: "Light Guardian",
    },
];

/// Look up a donation tier by slug.
pub fn find_tier(slug: &str) -> Result<&'static DonationTier, CoreError> {
    DONATION_TIERS
        .iter()
        .find(|t| t.slug == slug)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown donation tier '{}'. Valid tiers: {}",
                slug,
                DONATION_TIERS
                    .iter()
                    .map(|t| t.slug)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
}

/// The charge amount in cents for a tier and donation kind.
pub fn amount_cents(tier: &DonationTier, kind: DonationKind) -> i64 {
    match kind {
        DonationKind::OneTime => tier.one_time_cents,
        DonationKind::Monthly => tier.monthly_cents,
    }
}
