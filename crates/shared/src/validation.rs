//! Common validation and normalization utilities.

use validator::ValidationError;

/// Maximum length for team and bingo display names.
pub const MAX_NAME_LEN: usize = 64;

/// Normalizes a display name for uniqueness comparison.
///
/// Trims, lowercases, and collapses internal whitespace runs to a single
/// space. Two names that normalize equal are considered the same name.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Validates a team display name: non-empty after trimming, bounded length.
pub fn validate_team_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("team_name_empty");
        err.message = Some("Team name must not be blank".into());
        return Err(err);
    }
    if trimmed.len() > MAX_NAME_LEN {
        let mut err = ValidationError::new("team_name_length");
        err.message = Some("Team name must be at most 64 characters".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_trims_and_lowercases() {
        assert_eq!(normalize_name("  Red Team  "), "red team");
        assert_eq!(normalize_name("RED"), "red");
    }

    #[test]
    fn test_normalize_name_collapses_whitespace() {
        assert_eq!(normalize_name("Red   \t Team"), "red team");
    }

    #[test]
    fn test_normalize_name_empty() {
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn test_normalized_names_collide() {
        assert_eq!(normalize_name("Red Team"), normalize_name("  red   TEAM "));
    }

    #[test]
    fn test_validate_team_name_ok() {
        assert!(validate_team_name("Red Team").is_ok());
    }

    #[test]
    fn test_validate_team_name_blank() {
        assert!(validate_team_name("   ").is_err());
    }

    #[test]
    fn test_validate_team_name_too_long() {
        assert!(validate_team_name(&"x".repeat(65)).is_err());
        assert!(validate_team_name(&"x".repeat(64)).is_ok());
    }
}
