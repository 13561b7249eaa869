/// Per-season episode extraction.
///
/// The JSON-LD `episode` list is the primary source. Only when it yields
/// nothing do we scan the presentation markup, trying container, title and
/// rating selectors tier by tier.
use super::markup::{all_of_first_matching_tier, compile, element_text, first_in};
use super::structured_data::{JsonLdExt, extract_structured_data};
use super::{EpisodeRecord, valid_rating};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;

/// Episode containers, most semantic first
static CONTAINER_TIERS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        "article.episode-item-wrapper",
        "div.list_item",
        "li.ipc-metadata-list-summary-item",
        r#"[data-testid="episodes-container"] > div"#,
    ])
});

static TITLE_LINK_TIERS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        r#"a[data-testid="episode-title-link"]"#,
        r#"a[itemprop="name"]"#,
        "strong a",
        r#"a[href*="/title/tt"]"#,
    ])
});

/// Title text container, also carries the "S1.E3" marker
static TITLE_TEXT_TIERS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| compile(&["div.ipc-title__text"]));

static RATING_TIERS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        "span.ipc-rating-star--rating",
        "span.ipc-rating-star",
        ".ratingValue span",
        r#"[data-testid="ratingGroup--imdb-rating"]"#,
    ])
});

/// "S1.E3 ∙ Title" -> "Title"
static EPISODE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ES]\d+\.?[ES]?\d*\s*[∙·]\s*(.+)").expect("Invalid episode prefix regex")
});

static EPISODE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"E(\d+)").expect("Invalid episode marker regex"));

static DECIMAL_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*").expect("Invalid decimal number regex"));

/// Extracts all episodes of one season from its parsed listing page.
///
/// Structured data wins whenever it yields at least one episode; its
/// result is sorted by episode number. The markup fallback keeps document
/// order. May return an empty list if neither source has anything.
pub fn extract_episodes(document: &Html) -> Vec<EpisodeRecord> {
    let episodes = episodes_from_structured_data(document);
    if !episodes.is_empty() {
        return episodes;
    }

    tracing::debug!("no episodes in structured data, scanning markup");
    episodes_from_markup(document)
}

fn episodes_from_structured_data(document: &Html) -> Vec<EpisodeRecord> {
    let Some(data) = extract_structured_data(document) else {
        return Vec::new();
    };
    let Some(entries) = data.field("episode").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut episodes: Vec<EpisodeRecord> = entries
        .iter()
        .zip(1..)
        .map(|(entry, position)| structured_episode(entry, position))
        .collect();

    // Payload order is not guaranteed to be episode order
    episodes.sort_by_key(|episode| episode.episode_number);
    episodes
}

fn structured_episode(entry: &Value, position: u32) -> EpisodeRecord {
    let episode_number = entry.positive_int_field("episodeNumber").unwrap_or(position);

    let title = entry
        .str_field("name")
        .unwrap_or_else(|| EpisodeRecord::placeholder_title(episode_number));

    let rating = entry
        .field("aggregateRating")
        .and_then(|aggregate| aggregate.number_field("ratingValue"))
        .and_then(valid_rating);

    EpisodeRecord {
        episode_number,
        title,
        rating,
    }
}

fn episodes_from_markup(document: &Html) -> Vec<EpisodeRecord> {
    let Some((tier, containers)) = all_of_first_matching_tier(document, &CONTAINER_TIERS) else {
        tracing::debug!("no episode containers found in markup");
        return Vec::new();
    };

    tracing::debug!(tier, count = containers.len(), "episode containers found");

    containers
        .into_iter()
        .zip(1..)
        .map(|(item, position)| markup_episode(item, position))
        .collect()
}

fn markup_episode(item: ElementRef<'_>, position: u32) -> EpisodeRecord {
    let title_text = first_in(item, &TITLE_TEXT_TIERS).map(element_text);

    let title = first_in(item, &TITLE_LINK_TIERS)
        .map(element_text)
        .filter(|title| !title.is_empty())
        .or_else(|| {
            title_text
                .as_deref()
                .map(strip_episode_prefix)
                .filter(|title| !title.is_empty())
        })
        .unwrap_or_else(|| EpisodeRecord::placeholder_title(position));

    let rating = first_in(item, &RATING_TIERS)
        .map(element_text)
        .and_then(|text| parse_rating(&text));

    let episode_number = title_text
        .as_deref()
        .and_then(episode_marker)
        .unwrap_or(position);

    EpisodeRecord {
        episode_number,
        title,
        rating,
    }
}

fn strip_episode_prefix(text: &str) -> String {
    match EPISODE_PREFIX.captures(text) {
        Some(caps) => caps[1].trim().to_string(),
        None => text.to_string(),
    }
}

fn episode_marker(text: &str) -> Option<u32> {
    let caps = EPISODE_MARKER.captures(text)?;
    caps[1].parse::<u32>().ok().filter(|n| *n > 0)
}

/// First decimal-looking number in `text`, if it is a valid rating
fn parse_rating(text: &str) -> Option<f64> {
    let number = DECIMAL_NUMBER.find(text)?;
    number.as_str().parse::<f64>().ok().and_then(valid_rating)
}
