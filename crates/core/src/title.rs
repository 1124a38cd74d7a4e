//! Title kind constants and validation.

use crate::error::CoreError;

/// A feature film entry.
pub const KIND_MOVIE: &str = "movie";

/// A television drama entry.
pub const KIND_DRAMA: &str = "drama";

/// All valid title kinds.
pub const VALID_TITLE_KINDS: &[&str] = &[KIND_MOVIE, KIND_DRAMA];

/// Maximum length for a title's display name.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Validate that a title kind string is one of the accepted values.
pub fn validate_title_kind(kind: &str) -> Result<(), CoreError> {
    if VALID_TITLE_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid title kind '{kind}'. Must be one of: {}",
            VALID_TITLE_KINDS.join(", ")
        )))
    }
}

/// Validate a title's display name.
pub fn validate_title_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Title name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title name exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a 0-10 quality rating.
pub fn validate_rating(rating: f64) -> Result<(), CoreError> {
    if !(0.0..=10.0).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between 0.0 and 10.0, got {rating}"
        )));
    }
    Ok(())
}
