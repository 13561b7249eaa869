/// Season enumeration with ordered fallbacks.
use super::markup::compile;
use super::structured_data::{JsonLdExt, extract_structured_data};
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::sync::LazyLock;

static SEASON_LINK_TIERS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[r#"a[href*="episodes?season="], a[href*="episodes/?season="]"#])
});

static SEASON_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"season=(\d+)").expect("Invalid season parameter regex"));

/// A strategy recovering the season list from the episode listing page
type ListingStrategy = fn(&Html) -> Option<Vec<u32>>;

/// Listing strategies, most reliable first
const LISTING_STRATEGIES: &[(&str, ListingStrategy)] = &[
    ("structured data", seasons_from_structured_data),
    ("season links", seasons_from_links),
];

/// Determines the ordered list of season numbers for a show.
///
/// A known positive `known_count` wins outright and `fetch_listing` is
/// never called. Otherwise the episode listing page is fetched through
/// `fetch_listing` and handed to `seasons_from_listing`. Only a failing
/// fetch produces an error.
pub fn enumerate_seasons<F, E>(known_count: Option<u32>, fetch_listing: F) -> Result<Vec<u32>, E>
where
    F: FnOnce() -> Result<String, E>,
{
    if let Some(count) = known_count.filter(|count| *count > 0) {
        return Ok((1..=count).collect());
    }

    let listing = fetch_listing()?;
    let document = Html::parse_document(&listing);
    Ok(seasons_from_listing(&document))
}

/// Recovers seasons from a parsed episode listing page.
///
/// Always returns a non-empty ascending list; `[1]` when nothing else
/// can be found.
pub fn seasons_from_listing(document: &Html) -> Vec<u32> {
    for (name, strategy) in LISTING_STRATEGIES {
        if let Some(seasons) = strategy(document) {
            tracing::debug!(strategy = name, count = seasons.len(), "seasons found");
            return seasons;
        }
    }

    tracing::debug!("no season information found, assuming a single season");
    vec![1]
}

/// Season count from the listing's JSON-LD, preferring the `partOfSeries`
/// relation over a top-level count.
fn seasons_from_structured_data(document: &Html) -> Option<Vec<u32>> {
    let data = extract_structured_data(document)?;
    let count = data
        .field("partOfSeries")
        .and_then(|series| series.positive_int_field("numberOfSeasons"))
        .or_else(|| data.positive_int_field("numberOfSeasons"))?;

    Some((1..=count).collect())
}

/// Distinct `season=<N>` values referenced by season navigation links
fn seasons_from_links(document: &Html) -> Option<Vec<u32>> {
    let seasons: BTreeSet<u32> = SEASON_LINK_TIERS
        .iter()
        .flat_map(|selector| document.select(selector))
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| SEASON_PARAM.captures(href))
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .filter(|season| *season > 0)
        .collect();

    (!seasons.is_empty()).then(|| seasons.into_iter().collect())
}
