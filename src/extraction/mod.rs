//! Structured extraction of show, season and episode data
//!
//! Every extractor in here works on an already parsed document and never
//! fails: missing or malformed markup degrades to the next fallback tier,
//! and ultimately to a sentinel value. Only fetching (done by the caller)
//! can abort a run.

mod episodes;
mod markup;
mod seasons;
mod show_metadata;
mod structured_data;

pub use episodes::extract_episodes;
pub use seasons::{enumerate_seasons, seasons_from_listing};
pub use show_metadata::recover_show_metadata;
pub use structured_data::{JsonLdExt, extract_structured_data};

use serde::Serialize;

/// Name used when no show title can be recovered from the page
pub const UNKNOWN_SHOW: &str = "Unknown Show";

/// Show-level data recovered from the title page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowMetadata {
    /// Display name, never empty (`UNKNOWN_SHOW` if unrecoverable)
    pub name: String,
    /// Poster image URL if one was found
    pub poster_url: Option<String>,
    /// Number of seasons as announced by the structured data block
    pub season_count: Option<u32>,
}

impl Default for ShowMetadata {
    fn default() -> Self {
        Self {
            name: UNKNOWN_SHOW.to_string(),
            poster_url: None,
            season_count: None,
        }
    }
}

/// A single episode as extracted from a season listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeRecord {
    /// Episode number within the season
    pub episode_number: u32,
    /// Episode title, synthesized as "Episode N" when unrecoverable
    pub title: String,
    /// User rating in [0, 10], if the episode has one
    pub rating: Option<f64>,
}

impl EpisodeRecord {
    /// Builds the placeholder title for an episode without one
    pub(crate) fn placeholder_title(episode_number: u32) -> String {
        format!("Episode {}", episode_number)
    }
}

/// All episodes extracted for one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonData {
    /// The season number
    pub season_number: u32,
    /// Episodes in extraction order
    pub episodes: Vec<EpisodeRecord>,
}

/// Accepts a rating only if it is a finite value inside [0, 10]
pub(crate) fn valid_rating(value: f64) -> Option<f64> {
    (value.is_finite() && (0.0..=10.0).contains(&value)).then_some(value)
}
