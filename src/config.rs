//! Run configuration
//!
//! Everything that used to be a process-wide constant (request headers,
//! base URL, output location) lives in explicit values that get handed to
//! the fetcher and the report writer at construction.

use crate::identifier::ShowId;
use std::path::PathBuf;
use std::time::Duration;

/// Desktop browser user agent; IMDb serves reduced markup to unknown clients
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Settings for talking to the ratings site
#[derive(Debug, Clone, PartialEq)]
pub struct ScraperConfig {
    /// Site root without trailing slash
    pub base_url: String,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Value of the `Accept-Language` header
    pub accept_language: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.imdb.com".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ScraperConfig {
    /// Returns a copy pointing at a different site root
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// URL of the show's main title page
    pub fn title_url(&self, id: &ShowId) -> String {
        format!("{}/title/{}/", self.base_url, id)
    }

    /// URL of the show's episode listing page (no season selected)
    pub fn episodes_url(&self, id: &ShowId) -> String {
        format!("{}/title/{}/episodes/", self.base_url, id)
    }

    /// URL of the episode listing for one season
    pub fn season_url(&self, id: &ShowId, season: u32) -> String {
        format!("{}/title/{}/episodes/?season={}", self.base_url, id, season)
    }
}

/// Settings for writing the rendered heatmap
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Directory the HTML file is written into (created when missing)
    pub output_dir: PathBuf,
    /// Explicit file name; derived from the show name when `None`
    pub output_name: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            output_name: None,
        }
    }
}
