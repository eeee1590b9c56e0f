//! Announcement creation rules.
//!
//! Announcements are org-wide, so their gates are role-based rather than
//! division-based; the predicates themselves live in [`crate::policy`].

use crate::error::CoreError;

/// Maximum length for an announcement title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for announcement content.
pub const MAX_CONTENT_LENGTH: usize = 20_000;

/// Validate the caller-supplied fields of a new or edited announcement.
pub fn validate_announcement(title: &str, content: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".to_string()));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Content must not be empty".to_string(),
        ));
    }
    if content.len() > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Content exceeds maximum length of {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}
