//! Link field handling: URL scheme normalization and presence checks.
//!
//! Normalization is permissive. The only rule is that a value
//! without an `http://` or `https://` prefix gets `https://` prepended;
//! anything else (spaces, odd hosts, other schemes) passes through untouched.

use crate::error::CoreError;

/// Scheme prepended to URLs submitted without one.
pub const DEFAULT_SCHEME: &str = "https://";

/// Message returned when a link is submitted without a URL.
pub const URL_REQUIRED: &str = "URL is required";

/// Prefix `url` with `https://` unless it already starts with `http://` or
/// `https://`. The prefix check is case-sensitive.
///
/// ```
/// use linkportal_core::links::normalize_url;
///
/// assert_eq!(normalize_url("example.com"), "https://example.com");
/// assert_eq!(normalize_url("http://example.com"), "http://example.com");
/// ```
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{url}")
    }
}

/// Reject a missing or blank URL.
pub fn require_url(url: &str) -> Result<(), CoreError> {
    if url.trim().is_empty() {
        return Err(CoreError::Validation(URL_REQUIRED.to_string()));
    }
    Ok(())
}

/// Collapse blank titles to `None` so "no title" has a single representation.
pub fn normalize_title(title: Option<&str>) -> Option<String> {
    title
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
}
