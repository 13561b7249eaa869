//! Episode Heatmap - per-episode rating trends for tv series
//!
//! This library scrapes per-episode ratings of a show from IMDb pages,
//! recovering the data from embedded structured data with markup
//! fallbacks, and reduces them into statistics and a color-coded heatmap.

mod analytics;
mod colorizer;
mod config;
mod extraction;
mod identifier;
mod page_fetcher;
mod report;

use scraper::Html;
use serde::Serialize;
use thiserror::Error;

pub use analytics::{AnalyticsSummary, RatedEpisode, SeasonAverage, compute_analytics};
pub use colorizer::{RatingColor, rating_color};
pub use config::{ReportConfig, ScraperConfig};
pub use extraction::{
    EpisodeRecord, JsonLdExt, SeasonData, ShowMetadata, UNKNOWN_SHOW, enumerate_seasons,
    extract_episodes, extract_structured_data, recover_show_metadata, seasons_from_listing,
};
pub use identifier::{InvalidReferenceError, ShowId, resolve_show_id};
pub use page_fetcher::{FetchError, HttpPageFetcher, PageFetcher};
pub use report::{ReportError, output_filename, render_html, slugify, write_report};

/// Progress event emitted while scraping a show
///
/// These events allow library users to report progress however they like,
/// or to stay silent.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Title id resolved, scraping begins
    Started { show_id: ShowId },

    /// Fetching the show's title page
    FetchingShowInfo { url: String },

    /// Show metadata recovered
    ShowInfoFetched { name: String },

    /// Determining the list of seasons
    FetchingSeasons,

    /// Season list determined
    SeasonsFound { count: usize },

    /// Fetching one season's episode listing
    FetchingSeason { season_number: u32, url: String },

    /// Episodes of a season extracted
    SeasonFetched {
        season_number: u32,
        episode_count: usize,
    },

    /// Computing statistics
    CalculatingAnalytics,

    /// Scraping finished
    Complete { total_episodes: usize },
}

/// Everything the renderer needs about one show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowReport {
    /// The resolved title id
    pub show_id: ShowId,
    /// Address of the show's title page
    pub page_url: String,
    /// Name, poster and announced season count
    pub metadata: ShowMetadata,
    /// One entry per enumerated season, ascending
    pub seasons: Vec<SeasonData>,
    /// Statistics over all rated episodes
    pub analytics: AnalyticsSummary,
    /// Largest episode count of any season, sizes the heatmap grid
    pub max_episodes: usize,
}

/// Top-level error type for Episode Heatmap operations
#[derive(Debug, Error)]
pub enum HeatmapError {
    /// The reference did not contain a title id
    #[error(transparent)]
    InvalidReference(#[from] InvalidReferenceError),

    /// A page could not be fetched
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The report could not be written
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// The report could not be serialized to JSON
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Scrapes all seasons of a show and computes its rating statistics
///
/// Resolves the title id from `reference`, recovers the show metadata from
/// the title page, enumerates the seasons (fetching the episode listing
/// only if the season count is unknown), then fetches and extracts every
/// season one after another before computing the analytics.
///
/// Any fetch failure aborts the whole run; markup problems never do.
///
/// # Arguments
///
/// * `reference` - A show URL or anything else containing a `tt…` id
/// * `config` - Site URLs used to build page addresses
/// * `fetcher` - The document source
/// * `progress_callback` - Closure called with progress events
///
/// # Examples
///
/// ```no_run
/// use episode_heatmap::{HttpPageFetcher, ScraperConfig, scrape_show};
///
/// let config = ScraperConfig::default();
/// let fetcher = HttpPageFetcher::new(&config).unwrap();
/// let report = scrape_show(
///     "https://www.imdb.com/title/tt0903747/",
///     &config,
///     &fetcher,
///     |_| {}, // Silent operation
/// )
/// .unwrap();
/// println!("{} rated episodes", report.analytics.total_episodes);
/// ```
pub fn scrape_show<P, F>(
    reference: &str,
    config: &ScraperConfig,
    fetcher: &P,
    mut progress_callback: F,
) -> Result<ShowReport, HeatmapError>
where
    P: PageFetcher + ?Sized,
    F: FnMut(ProgressEvent),
{
    let show_id = resolve_show_id(reference)?;
    progress_callback(ProgressEvent::Started {
        show_id: show_id.clone(),
    });

    // Show metadata from the title page
    let title_url = config.title_url(&show_id);
    progress_callback(ProgressEvent::FetchingShowInfo {
        url: title_url.clone(),
    });
    let title_page = fetcher.fetch_page(&title_url)?;
    let metadata = recover_show_metadata(&Html::parse_document(&title_page));
    progress_callback(ProgressEvent::ShowInfoFetched {
        name: metadata.name.clone(),
    });

    // Season list, the listing page is only fetched when needed
    progress_callback(ProgressEvent::FetchingSeasons);
    let season_numbers = enumerate_seasons(metadata.season_count, || {
        fetcher.fetch_page(&config.episodes_url(&show_id))
    })?;
    progress_callback(ProgressEvent::SeasonsFound {
        count: season_numbers.len(),
    });

    // Episodes, strictly one season after another
    let mut seasons = Vec::with_capacity(season_numbers.len());
    for season_number in season_numbers {
        let url = config.season_url(&show_id, season_number);
        progress_callback(ProgressEvent::FetchingSeason {
            season_number,
            url: url.clone(),
        });

        let page = fetcher.fetch_page(&url)?;
        let episodes = extract_episodes(&Html::parse_document(&page));
        if episodes.is_empty() {
            tracing::warn!(season_number, "no episodes found for season");
        }

        progress_callback(ProgressEvent::SeasonFetched {
            season_number,
            episode_count: episodes.len(),
        });
        seasons.push(SeasonData {
            season_number,
            episodes,
        });
    }

    progress_callback(ProgressEvent::CalculatingAnalytics);
    let analytics = compute_analytics(&seasons);
    let max_episodes = seasons
        .iter()
        .map(|season| season.episodes.len())
        .max()
        .unwrap_or(0);

    progress_callback(ProgressEvent::Complete {
        total_episodes: analytics.total_episodes,
    });

    Ok(ShowReport {
        show_id,
        page_url: title_url,
        metadata,
        seasons,
        analytics,
        max_episodes,
    })
}
