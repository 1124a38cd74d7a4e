//! Safety report submission validation.
//!
//! Reports are append-only once accepted: validation happens here, at the
//! submission edge, and the aggregator defensively ignores anything that
//! still looks malformed.

use crate::error::CoreError;

/// Allowed values for the "months since upload" bucket.
pub const VALID_MONTH_BUCKETS: &[i32] = &[0, 1, 3, 6, 12];

/// Maximum length for a report's free-text comment.
pub const MAX_COMMENT_LENGTH: usize = 2_000;

/// Validate a months-since-upload bucket value.
pub fn validate_months_bucket(months: i32) -> Result<(), CoreError> {
    if VALID_MONTH_BUCKETS.contains(&months) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid months_since_upload value {months}. Must be one of: {}",
            VALID_MONTH_BUCKETS
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}

/// Validate a report comment, if present.
pub fn validate_comment(comment: Option<&str>) -> Result<(), CoreError> {
    if let Some(c) = comment {
        if c.len() > MAX_COMMENT_LENGTH {
            return Err(CoreError::Validation(format!(
                "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Validate a report submission.
///
/// A reporter who produced a short must answer every outcome question; a
/// reporter who did not produce one may leave them all unanswered (the
/// report then only signals "not yet attempted").
pub fn validate_submission(
    shorts_created: bool,
    copyright_issue: Option<bool>,
    shorts_deleted: Option<bool>,
    months_since_upload: Option<i32>,
) -> Result<(), CoreError> {
    if !shorts_created {
        return Ok(());
    }

    if copyright_issue.is_none() {
        return Err(CoreError::Validation(
            "copyright_issue is required when a short was produced".to_string(),
        ));
    }
    if shorts_deleted.is_none() {
        return Err(CoreError::Validation(
            "shorts_deleted is required when a short was produced".to_string(),
        ));
    }
    match months_since_upload {
        Some(months) => validate_months_bucket(months),
        None => Err(CoreError::Validation(
            "months_since_upload is required when a short was produced".to_string(),
        )),
    }
}
