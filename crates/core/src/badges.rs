//! Badge tier ranking and badge display effects.
//!
//! Tiers form a total order (bronze < silver < gold < platinum < founder).
//! A user's summary display shows the single highest tier they hold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Badge tiers
// ---------------------------------------------------------------------------

/// Prestige tier of a badge, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Founder,
}

impl BadgeTier {
    /// Numeric rank used for ordering and display (bronze = 1 .. founder = 5).
    pub fn rank(self) -> u8 {
        match self {
            BadgeTier::Bronze => 1,
            BadgeTier::Silver => 2,
            BadgeTier::Gold => 3,
            BadgeTier::Platinum => 4,
            BadgeTier::Founder => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BadgeTier::Bronze => "bronze",
            BadgeTier::Silver => "silver",
            BadgeTier::Gold => "gold",
            BadgeTier::Platinum => "platinum",
            BadgeTier::Founder => "founder",
        }
    }
}

impl fmt::Display for BadgeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeTier {
    type Err = CoreError;

    /// Parse a stored tier value. Unknown values are a validation error, not
    /// a silent fallback, so bad reference data is caught at the boundary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bronze" => Ok(BadgeTier::Bronze),
            "silver" => Ok(BadgeTier::Silver),
            "gold" => Ok(BadgeTier::Gold),
            "platinum" => Ok(BadgeTier::Platinum),
            "founder" => Ok(BadgeTier::Founder),
            other => Err(CoreError::Validation(format!(
                "Unknown badge tier '{other}'"
            ))),
        }
    }
}

/// The highest tier present in a badge collection.
///
/// An empty collection defaults to [`BadgeTier::Bronze`] so summary widgets
/// always have something to render.
pub fn highest_tier(tiers: &[BadgeTier]) -> BadgeTier {
    tiers.iter().copied().max().unwrap_or(BadgeTier::Bronze)
}

// ---------------------------------------------------------------------------
// Special effects
// ---------------------------------------------------------------------------

/// Founder badges render with a golden aura.
pub const EFFECT_FOUNDER_AURA: &str = "founder_aura";
/// Limited-supply badges shimmer.
pub const EFFECT_QUANTUM_SHIMMER: &str = "quantum_shimmer";
/// Enhanced user badges glow.
pub const EFFECT_COSMIC_GLOW: &str = "cosmic_glow";

/// All valid badge special effects.
///
/// The effect is an explicit column set when the badge is seeded, replacing
/// the old scheme of inferring rendering from substrings of the badge name.
pub const VALID_SPECIAL_EFFECTS: &[&str] = &[
    EFFECT_FOUNDER_AURA,
    EFFECT_QUANTUM_SHIMMER,
    EFFECT_COSMIC_GLOW,
];

/// Validate a badge special effect against the known set.
pub fn validate_special_effect(effect: &str) -> Result<(), CoreError> {
    if !VALID_SPECIAL_EFFECTS.contains(&effect) {
        return Err(CoreError::Validation(format!(
            "Invalid special effect '{}'. Valid effects: {}",
            effect,
            VALID_SPECIAL_EFFECTS.join(", ")
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_order_is_ascending() {
        assert!(BadgeTier::Bronze < BadgeTier::Silver);
        assert!(BadgeTier::Silver < BadgeTier::Gold);
        assert!(BadgeTier::Gold < BadgeTier::Platinum);
        assert!(BadgeTier::Platinum < BadgeTier::Founder);
    }

    #[test]
    fn tier_ranks() {
        assert_eq!(BadgeTier::Bronze.rank(), 1);
        assert_eq!(BadgeTier::Founder.rank(), 5);
    }

    #[test]
    fn highest_tier_picks_maximum() {
        let tiers = vec![BadgeTier::Silver, BadgeTier::Founder, BadgeTier::Gold];
        assert_eq!(highest_tier(&tiers), BadgeTier::Founder);
    }

    #[test]
    fn highest_tier_empty_defaults_to_bronze() {
        assert_eq!(highest_tier(&[]), BadgeTier::Bronze);
    }

    #[test]
    fn highest_tier_single_element() {
        assert_eq!(highest_tier(&[BadgeTier::Gold]), BadgeTier::Gold);
    }

    #[test]
    fn parse_valid_tiers() {
        assert_eq!("bronze".parse::<BadgeTier>().unwrap(), BadgeTier::Bronze);
        assert_eq!("founder".parse::<BadgeTier>().unwrap(), BadgeTier::Founder);
    }

    #[test]
    fn parse_unknown_tier_rejected() {
        assert!("diamond".parse::<BadgeTier>().is_err());
        assert!("".parse::<BadgeTier>().is_err());
    }

    #[test]
    fn tier_display_round_trips() {
        for tier in [
            BadgeTier::Bronze,
            BadgeTier::Silver,
            BadgeTier::Gold,
            BadgeTier::Platinum,
            BadgeTier::Founder,
        ] {
            assert_eq!(tier.to_string().parse::<BadgeTier>().unwrap(), tier);
        }
    }

    #[test]
    fn special_effect_valid() {
        assert!(validate_special_effect(EFFECT_FOUNDER_AURA).is_ok());
    }

    #[test]
    fn special_effect_invalid() {
        assert!(validate_special_effect("sparkles").is_err());
    }
}
