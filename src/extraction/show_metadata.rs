/// Show metadata recovery from the title page.
use super::markup::{compile, element_text, first_in_document};
use super::structured_data::{JsonLdExt, extract_structured_data};
use super::{ShowMetadata, UNKNOWN_SHOW};
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Page heading, hero title first
static HEADING_TIERS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| compile(&[r#"h1[data-testid="hero__pageTitle"] span"#, "h1"]));

/// Poster image, responsive image first
static POSTER_TIERS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        "img.ipc-image[srcset]",
        r#"div[data-testid="hero-media__poster"] img"#,
    ])
});

/// Recovers name, poster and season count from a parsed title page.
///
/// Never fails. The name falls back from structured data to the page
/// heading and finally to `UNKNOWN_SHOW`; the season count only ever
/// comes from structured data.
pub fn recover_show_metadata(document: &Html) -> ShowMetadata {
    let structured = extract_structured_data(document);

    let mut name = structured
        .as_ref()
        .and_then(|data| data.str_field("name"))
        .unwrap_or_else(|| UNKNOWN_SHOW.to_string());

    if name == UNKNOWN_SHOW {
        tracing::debug!("no name in structured data, falling back to page heading");
        if let Some(heading) = first_in_document(document, &HEADING_TIERS) {
            let text = element_text(heading);
            if !text.is_empty() {
                name = text;
            }
        }
    }

    let season_count = structured
        .as_ref()
        .and_then(|data| data.positive_int_field("numberOfSeasons"));

    let poster_url = first_in_document(document, &POSTER_TIERS)
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string);

    ShowMetadata {
        name,
        poster_url,
        season_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(head: &str, body: &str) -> Html {
        Html::parse_document(&format!(
            "<html><head>{}</head><body>{}</body></html>",
            head, body
        ))
    }

    #[test]
    fn test_everything_from_structured_data() {
        let document = page(
            r#"<script type="application/ld+json">{"name": "Breaking Bad", "numberOfSeasons": 5}</script>"#,
            r#"<h1>Ignored Heading</h1><img class="ipc-image" srcset="a 1x" src="https://img/poster.jpg">"#,
        );

        let metadata = recover_show_metadata(&document);
        assert_eq!(metadata.name, "Breaking Bad");
        assert_eq!(metadata.season_count, Some(5));
        assert_eq!(metadata.poster_url.as_deref(), Some("https://img/poster.jpg"));
    }

    #[test]
    fn test_name_prefers_hero_title() {
        let document = page(
            "",
            r#"<h1>Generic</h1><h1 data-testid="hero__pageTitle"><span>The Wire</span></h1>"#,
        );
        assert_eq!(recover_show_metadata(&document).name, "The Wire");
    }

    #[test]
    fn test_name_falls_back_to_first_heading() {
        let document = page(
            r#"<script type="application/ld+json">{"numberOfSeasons": "3"}</script>"#,
            "<h2>Not this</h2><h1> Fargo </h1>",
        );
        let metadata = recover_show_metadata(&document);
        assert_eq!(metadata.name, "Fargo");
        assert_eq!(metadata.season_count, Some(3));
    }

    #[test]
    fn test_malformed_structured_data_degrades_to_markup() {
        let document = page(
            r#"<script type="application/ld+json">{"name": "Broken"</script>"#,
            "<h1>Dark</h1>",
        );
        let metadata = recover_show_metadata(&document);
        assert_eq!(metadata.name, "Dark");
        assert_eq!(metadata.season_count, None);
    }

    #[test]
    fn test_nothing_recoverable() {
        let document = page("", "<h1>   </h1><p>nothing</p>");
        assert_eq!(recover_show_metadata(&document), ShowMetadata::default());
    }

    #[test]
    fn test_poster_falls_back_to_poster_region() {
        let document = page(
            "",
            r#"<img src="https://img/logo.png"><div data-testid="hero-media__poster"><img src="https://img/p.jpg"></div>"#,
        );
        assert_eq!(
            recover_show_metadata(&document).poster_url.as_deref(),
            Some("https://img/p.jpg")
        );
    }

    #[test]
    fn test_non_positive_season_count_is_absent() {
        let document = page(
            r#"<script type="application/ld+json">{"name": "X", "numberOfSeasons": 0}</script>"#,
            "",
        );
        assert_eq!(recover_show_metadata(&document).season_count, None);
    }
}
