//! The resonance recommendation engine.
//!
//! Derives a "spiritual profile" (a 0..=100 resonance value per category)
//! from a user's earned badges, then scores a fixed catalog of practices and
//! a list of discussions against that profile with weighted tag matching.
//!
//! Everything here is deterministic: the small "quantum variety" perturbation
//! applied to discussion scores is drawn from a caller-supplied RNG, so a
//! seeded generator reproduces exact output in tests.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// The eleven resonance categories every profile is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Meditation,
    Healing,
    Wisdom,
    Community,
    Creativity,
    Nature,
    Cosmos,
    Compassion,
    Transformation,
    Intuition,
    Harmony,
}

/// Number of resonance categories.
pub const CATEGORY_COUNT: usize = 11;

impl Category {
    /// All categories, in canonical order.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Meditation,
        Category::Healing,
        Category::Wisdom,
        Category::Community,
        Category::Creativity,
        Category::Nature,
        Category::Cosmos,
        Category::Compassion,
        Category::Transformation,
        Category::Intuition,
        Category::Harmony,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Meditation => "meditation",
            Category::Healing => "healing",
            Category::Wisdom => "wisdom",
            Category::Community => "community",
            Category::Creativity => "creativity",
            Category::Nature => "nature",
            Category::Cosmos => "cosmos",
            Category::Compassion => "compassion",
            Category::Transformation => "transformation",
            Category::Intuition => "intuition",
            Category::Harmony => "harmony",
        }
    }

    /// Keywords that mark a badge as contributing to this category.
    fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Meditation => &["meditation", "stillness", "presence", "breath"],
            Category::Healing => &["healing", "restoration", "renewal"],
            Category::Wisdom => &["wisdom", "insight", "knowledge", "sage"],
            Category::Community => &["community", "gathering", "fellowship", "circle"],
            Category::Creativity => &["creativity", "creation", "art", "expression"],
            Category::Nature => &["nature", "earth", "tree", "seed", "garden"],
            Category::Cosmos => &["cosmos", "cosmic", "star", "celestial", "quantum"],
            Category::Compassion => &["compassion", "kindness", "service", "care"],
            Category::Transformation => &["transformation", "awakening", "rebirth"],
            Category::Intuition => &["intuition", "dream", "vision", "oracle"],
            Category::Harmony => &["harmony", "balance", "peace", "unity"],
        }
    }

    /// Profile increment applied per keyword match for this category.
    ///
    /// Ranges 10..=15; rarer themes weigh slightly more.
    fn increment(self) -> f64 {
        match self {
            Category::Meditation => 10.0,
            Category::Healing => 12.0,
            Category::Wisdom => 10.0,
            Category::Community => 10.0,
            Category::Creativity => 12.0,
            Category::Nature => 12.0,
            Category::Cosmos => 15.0,
            Category::Compassion => 12.0,
            Category::Transformation => 15.0,
            Category::Intuition => 13.0,
            Category::Harmony => 10.0,
        }
    }

    /// Map an energy-signature tag to a category, if it names one.
    pub fn from_tag(tag: &str) -> Option<Category> {
        let tag = tag.trim().to_lowercase();
        Category::ALL.into_iter().find(|c| c.as_str() == tag)
    }
}

// ---------------------------------------------------------------------------
// Profile derivation
// ---------------------------------------------------------------------------

/// Base resonance every category starts from.
const PROFILE_BASE: f64 = 20.0;

/// Name and description of an earned badge, the only inputs profile
/// derivation looks at.
#[derive(Debug, Clone)]
pub struct BadgeText {
    pub name: String,
    pub description: String,
}

/// A user's resonance per category, each clamped to 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpiritualProfile {
    pub scores: BTreeMap<Category, f64>,
}

impl SpiritualProfile {
    /// Resonance value for one category.
    pub fn get(&self, category: Category) -> f64 {
        self.scores.get(&category).copied().unwrap_or(PROFILE_BASE)
    }

    /// The highest-scoring category and its value.
    ///
    /// Ties resolve to the earliest category in canonical order.
    pub fn highest(&self) -> (Category, f64) {
        let mut best = (Category::ALL[0], self.get(Category::ALL[0]));
        for category in Category::ALL {
            let value = self.get(category);
            if value > best.1 {
                best = (category, value);
            }
        }
        best
    }
}

/// Derive a spiritual profile from a user's earned badges.
///
/// Every category starts at the base value; each badge whose name or
/// description contains one of a category's keywords adds that category's
/// increment. Values are clamped to 0..=100.
pub fn derive_profile(badges: &[BadgeText]) -> SpiritualProfile {
    let mut scores: BTreeMap<Category, f64> =
        Category::ALL.into_iter().map(|c| (c, PROFILE_BASE)).collect();

    for badge in badges {
        let text = format!("{} {}", badge.name, badge.description).to_lowercase();
        for category in Category::ALL {
            if category.keywords().iter().any(|kw| text.contains(kw)) {
                let entry = scores.entry(category).or_insert(PROFILE_BASE);
                *entry = (*entry + category.increment()).clamp(0.0, 100.0);
            }
        }
    }

    SpiritualProfile { scores }
}

// ---------------------------------------------------------------------------
// Practice catalog
// ---------------------------------------------------------------------------

/// Base score for practice recommendations.
const PRACTICE_BASE: f64 = 50.0;
/// Weight of a matching tag when scoring practices.
const PRACTICE_TAG_WEIGHT: f64 = 10.0;

/// A catalog practice with its fixed energy signature.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Practice {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub energy_signature: &'static [&'static str],
}

/// The fixed practice catalog, seeded at compile time.
pub const PRACTICE_CATALOG: &[Practice] = &[
    Practice {
        id: "sunrise-stillness",
        name: "Sunrise Stillness",
        description: "A silent breath-centred sitting practice at first light.",
        energy_signature: &["meditation", "harmony"],
    },
    Practice {
        id: "rooted-walking",
        name: "Rooted Walking",
        description: "Slow barefoot walking meditation among trees.",
        energy_signature: &["nature", "meditation"],
    },
    Practice {
        id: "lovingkindness-circle",
        name: "Loving-Kindness Circle",
        description: "Group metta practice extending compassion outward.",
        energy_signature: &["compassion", "community"],
    },
    Practice {
        id: "star-gazing-vigil",
        name: "Star-Gazing Vigil",
        description: "An evening contemplation of the night sky.",
        energy_signature: &["cosmos", "wisdom"],
    },
    Practice {
        id: "dream-journaling",
        name: "Dream Journaling",
        description: "Recording and reading the imagery of your dreams.",
        energy_signature: &["intuition", "creativity"],
    },
    Practice {
        id: "sound-bath",
        name: "Sound Bath",
        description: "Restorative immersion in resonant tones.",
        energy_signature: &["healing", "harmony"],
    },
    Practice {
        id: "chrysalis-reflection",
        name: "Chrysalis Reflection",
        description: "A guided review of a season of personal change.",
        energy_signature: &["transformation", "wisdom"],
    },
    Practice {
        id: "open-studio",
        name: "Open Studio",
        description: "Unstructured creative expression with any medium.",
        energy_signature: &["creativity", "community"],
    },
];

/// A practice with its computed resonance score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPractice {
    #[serde(flatten)]
    pub practice: Practice,
    pub score: f64,
}

/// Score the practice catalog against a profile and return the top `n`.
///
/// Each practice starts at the base score; every energy-signature tag that
/// names a profile category adds `(value / 100) * 10`. Scores are clamped
/// to at most 100 and the result is sorted descending.
pub fn score_practices(profile: &SpiritualProfile, n: usize) -> Vec<ScoredPractice> {
    let mut scored: Vec<ScoredPractice> = PRACTICE_CATALOG
        .iter()
        .map(|practice| {
            let mut score = PRACTICE_BASE;
            for tag in practice.energy_signature {
                if let Some(category) = Category::from_tag(tag) {
                    score += profile.get(category) / 100.0 * PRACTICE_TAG_WEIGHT;
                }
            }
            ScoredPractice {
                practice: *practice,
                score: score.min(100.0),
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(n);
    scored
}

// ---------------------------------------------------------------------------
// Discussion scoring
// ---------------------------------------------------------------------------

/// Base score for discussion recommendations.
const DISCUSSION_BASE: f64 = 40.0;
/// Weight of a matching tag when scoring discussions.
const DISCUSSION_TAG_WEIGHT: f64 = 15.0;
/// Bound of the variety perturbation applied to discussion scores.
const PERTURBATION_BOUND: f64 = 5.0;
/// Number of discussion recommendations returned.
const DISCUSSION_TOP_N: usize = 2;

/// The discussion fields the scorer looks at.
#[derive(Debug, Clone)]
pub struct DiscussionSummary {
    pub id: DbId,
    pub title: String,
    pub tags: Vec<String>,
}

/// A discussion with its computed resonance score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDiscussion {
    pub id: DbId,
    pub title: String,
    pub score: f64,
}

/// Score discussions against a profile and return the top two.
///
/// Analogous to practice scoring but with a higher tag weight and a small
/// uniform perturbation in [-5, +5] for variety, drawn from the supplied
/// RNG. Final scores are clamped to 0..=100.
pub fn score_discussions<R: Rng>(
    profile: &SpiritualProfile,
    discussions: &[DiscussionSummary],
    rng: &mut R,
) -> Vec<ScoredDiscussion> {
    let mut scored: Vec<ScoredDiscussion> = discussions
        .iter()
        .map(|discussion| {
            let mut score = DISCUSSION_BASE;
            for tag in &discussion.tags {
                if let Some(category) = Category::from_tag(tag) {
                    score += profile.get(category) / 100.0 * DISCUSSION_TAG_WEIGHT;
                }
            }
            score += rng.random_range(-PERTURBATION_BOUND..=PERTURBATION_BOUND);
            ScoredDiscussion {
                id: discussion.id,
                title: discussion.title.clone(),
                score: score.clamp(0.0, 100.0),
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(DISCUSSION_TOP_N);
    scored
}

// ---------------------------------------------------------------------------
// Daily insight
// ---------------------------------------------------------------------------

/// Stock insight messages cycled daily per user.
pub const INSIGHTS: &[&str] = &[
    "What you tend grows; what you release makes room.",
    "The quietest hour of the day holds the clearest signal.",
    "Every circle you join reshapes the one you carry within.",
    "Change arrives as a whisper long before it knocks.",
    "Your attention is the rarest offering you can give.",
    "The stars you study are also studying patience in you.",
    "Kindness spent today is compounded by tomorrow.",
    "Balance is not stillness; it is continuous small correction.",
    "An unrecorded dream is a letter left unopened.",
    "Roots deepen in seasons nobody applauds.",
];

/// Select the insight for a given date and profile.
///
/// Deterministic: the index is `(days since the Unix epoch + the value of
/// the highest-scoring category) mod the list length`.
pub fn daily_insight(date: NaiveDate, profile: &SpiritualProfile) -> &'static str {
    // NaiveDate::default() is the Unix epoch (1970-01-01).
    let date_seed = (date - NaiveDate::default()).num_days();
    let (_, highest_value) = profile.highest();

    let index = (date_seed + highest_value as i64).rem_euclid(INSIGHTS.len() as i64);
    INSIGHTS[index as usize]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
