//! Show identifier resolution
//!
//! Turns whatever the user handed us (usually a full IMDb URL) into the
//! canonical `tt…` title id every later lookup is keyed on.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static TITLE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"tt\d+").expect("Invalid title id regex"));

/// The reference string did not contain a title id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not extract IMDb title id from reference: {reference}")]
pub struct InvalidReferenceError {
    /// The reference exactly as it was supplied
    pub reference: String,
}

/// Canonical IMDb title identifier (`tt` followed by digits)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShowId(String);

impl ShowId {
    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the first title id found anywhere in `reference`
///
/// # Examples
///
/// ```
/// use episode_heatmap::resolve_show_id;
///
/// let id = resolve_show_id("https://www.imdb.com/title/tt0903747/episodes").unwrap();
/// assert_eq!(id.as_str(), "tt0903747");
/// ```
pub fn resolve_show_id(reference: &str) -> Result<ShowId, InvalidReferenceError> {
    TITLE_ID_PATTERN
        .find(reference)
        .map(|m| ShowId(m.as_str().to_string()))
        .ok_or_else(|| InvalidReferenceError {
            reference: reference.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_from_episodes_url() {
        let id = resolve_show_id("https://example.com/title/tt0903747/episodes").unwrap();
        assert_eq!(id.as_str(), "tt0903747");
    }

    #[test]
    fn test_resolve_bare_id_and_first_match() {
        assert_eq!(resolve_show_id("tt42").unwrap().as_str(), "tt42");
        assert_eq!(
            resolve_show_id("/title/tt111/?ref=tt222").unwrap().as_str(),
            "tt111"
        );
    }

    #[test]
    fn test_resolve_rejects_missing_id() {
        for reference in ["", "https://www.imdb.com/", "tt", "TT0903747", "title/t0903747"] {
            let err = resolve_show_id(reference).unwrap_err();
            assert_eq!(err.reference, reference);
        }
    }

    #[test]
    fn test_error_message_names_reference() {
        let err = resolve_show_id("not a url").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not extract IMDb title id from reference: not a url"
        );
    }
}
