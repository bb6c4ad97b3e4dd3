//! Cosmic reaction validation.
//!
//! The toggle itself is an atomic repository operation keyed on
//! (content type, content id, user, emoji); this module only validates the
//! inputs against the fixed palettes.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Emoji palette
// ---------------------------------------------------------------------------

pub const EMOJI_SPARKLE: &str = "sparkle";
pub const EMOJI_LOTUS: &str = "lotus";
pub const EMOJI_STARSEED: &str = "starseed";
pub const EMOJI_HEART_GLOW: &str = "heart_glow";
pub const EMOJI_SPIRAL: &str = "spiral";

/// All valid reaction emoji ids.
pub const VALID_EMOJI: &[&str] = &[
    EMOJI_SPARKLE,
    EMOJI_LOTUS,
    EMOJI_STARSEED,
    EMOJI_HEART_GLOW,
    EMOJI_SPIRAL,
];

/// Validate an emoji id against the palette.
pub fn validate_emoji(emoji_id: &str) -> Result<(), CoreError> {
    if !VALID_EMOJI.contains(&emoji_id) {
        return Err(CoreError::Validation(format!(
            "Invalid emoji '{}'. Valid emoji: {}",
            emoji_id,
            VALID_EMOJI.join(", ")
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

pub const CONTENT_DISCUSSION: &str = "discussion";
pub const CONTENT_COMMENT: &str = "comment";
pub const CONTENT_PROPOSAL: &str = "proposal";

/// All content types reactions may attach to.
pub const VALID_CONTENT_TYPES: &[&str] = &[CONTENT_DISCUSSION, CONTENT_COMMENT, CONTENT_PROPOSAL];

/// Validate a reaction content type against the known set.
pub fn validate_content_type(content_type: &str) -> Result<(), CoreError> {
    if !VALID_CONTENT_TYPES.contains(&content_type) {
        return Err(CoreError::Validation(format!(
            "Invalid content type '{}'. Valid types: {}",
            content_type,
            VALID_CONTENT_TYPES.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_emoji_valid() {
        for emoji in VALID_EMOJI {
            assert!(validate_emoji(emoji).is_ok());
        }
    }

    #[test]
    fn unknown_emoji_rejected() {
        assert!(validate_emoji("thumbsup").is_err());
        assert!(validate_emoji("").is_err());
    }

    #[test]
    fn known_content_types_valid() {
        for content_type in VALID_CONTENT_TYPES {
            assert!(validate_content_type(content_type).is_ok());
        }
    }

    #[test]
    fn unknown_content_type_rejected() {
        assert!(validate_content_type("video").is_err());
    }
}
