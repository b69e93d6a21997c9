//! Presence checks for username/password submissions.

use crate::error::CoreError;

/// Message returned when either credential field is absent.
pub const MISSING_FIELDS: &str = "Missing fields";

/// Ensure both the username and the password were supplied.
///
/// Only presence is checked. Any non-empty value passes, including one made
/// of whitespace; no length or character rules are enforced.
pub fn require_credentials(username: &str, password: &str) -> Result<(), CoreError> {
    if username.is_empty() || password.is_empty() {
        return Err(CoreError::Validation(MISSING_FIELDS.to_string()));
    }
    Ok(())
}
