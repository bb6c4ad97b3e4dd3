//! Reward affordability and points-tier progression.
//!
//! Points tiers are a banded classification of a user's cumulative points
//! against a fixed ascending threshold table, distinct from badge tiers.

use serde::Serialize;

/// Ascending points thresholds. Index in this table is the tier index.
pub const TIER_THRESHOLDS: [i64; 5] = [0, 1_000, 5_000, 10_000, 25_000];

/// Display names for each points tier.
pub const TIER_NAMES: [&str; 5] = ["Seeker", "Initiate", "Adept", "Luminary", "Ascendant"];

/// Whether a user with `points` can redeem a reward costing `cost`.
pub fn can_afford(points: i64, cost: i64) -> bool {
    points >= cost
}

/// How many more points are needed to afford `cost` (0 when affordable).
pub fn points_needed(points: i64, cost: i64) -> i64 {
    (cost - points).max(0)
}

/// Index of the tier a points balance falls in.
///
/// The index of the highest threshold less than or equal to `points`,
/// clamped to 0 for negative balances (which should not occur; the server
/// never lets points go negative).
pub fn tier_index(points: i64) -> usize {
    TIER_THRESHOLDS
        .iter()
        .filter(|&&t| t <= points)
        .count()
        .saturating_sub(1)
}

/// A user's standing within the points-tier ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierStanding {
    /// Current tier index (0-based).
    pub tier: usize,
    /// Display name of the current tier.
    pub name: &'static str,
    /// Points threshold of the current tier.
    pub current_threshold: i64,
    /// Points threshold of the next tier, if any.
    pub next_threshold: Option<i64>,
    /// Progress within the current tier, 0..=100.
    pub progress: u32,
}

/// Classify a points balance against the tier table.
///
/// Progress is `(points - current) / (next - current) * 100`, clamped to
/// 100 once the balance reaches the last threshold (there is no next tier).
pub fn tier_standing(points: i64) -> TierStanding {
    let tier = tier_index(points);
    let current_threshold = TIER_THRESHOLDS[tier];
    let next_threshold = TIER_THRESHOLDS.get(tier + 1).copied();

    let progress = match next_threshold {
        Some(next) => {
            let span = next - current_threshold;
            let into = (points - current_threshold).clamp(0, span);
            (into * 100 / span) as u32
        }
        None => 100,
    };

    TierStanding {
        tier,
        name: TIER_NAMES[tier],
        current_threshold,
        next_threshold,
        progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- affordability -------------------------------------------------------

    #[test]
    fn afford_at_exact_cost() {
        assert!(can_afford(1000, 1000));
    }

    #[test]
    fn cannot_afford_one_short() {
        assert!(!can_afford(1000, 1001));
    }

    #[test]
    fn points_needed_when_short() {
        assert_eq!(points_needed(1200, 1500), 300);
    }

    #[test]
    fn points_needed_zero_when_affordable() {
        assert_eq!(points_needed(1500, 1500), 0);
        assert_eq!(points_needed(2000, 1500), 0);
    }

    // -- tier classification -------------------------------------------------

    #[test]
    fn tier_zero_at_start() {
        assert_eq!(tier_index(0), 0);
        assert_eq!(tier_index(999), 0);
    }

    #[test]
    fn tier_boundary_is_inclusive() {
        assert_eq!(tier_index(1000), 1);
        assert_eq!(tier_index(5000), 2);
        assert_eq!(tier_index(25_000), 4);
    }

    #[test]
    fn negative_points_clamp_to_tier_zero() {
        assert_eq!(tier_index(-50), 0);
    }

    #[test]
    fn spec_example_1200_points() {
        // 1200 points: tier 1, progress (1200-1000)/(5000-1000)*100 = 5%.
        let standing = tier_standing(1200);
        assert_eq!(standing.tier, 1);
        assert_eq!(standing.name, "Initiate");
        assert_eq!(standing.progress, 5);
        assert_eq!(standing.next_threshold, Some(5000));
    }

    #[test]
    fn progress_clamps_at_final_tier() {
        let standing = tier_standing(25_000);
        assert_eq!(standing.tier, 4);
        assert_eq!(standing.progress, 100);
        assert_eq!(standing.next_threshold, None);

        let beyond = tier_standing(1_000_000);
        assert_eq!(beyond.tier, 4);
        assert_eq!(beyond.progress, 100);
    }

    #[test]
    fn progress_zero_at_tier_floor() {
        let standing = tier_standing(1000);
        assert_eq!(standing.tier, 1);
        assert_eq!(standing.progress, 0);
    }
}
