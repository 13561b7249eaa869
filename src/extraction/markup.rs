/// Helpers for the presentation-markup fallback tiers.
///
/// A tier list is an ordered slice of CSS selectors. The driver functions
/// below try them in order and stop at the first one that matches, so
/// every caller expresses its fallback chain as plain data.
use scraper::{ElementRef, Html, Selector};

/// Compiles a list of constant selectors.
///
/// Only used from `LazyLock` initialisers with literal selector strings.
pub(super) fn compile(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .map(|s| Selector::parse(s).expect("Invalid constant selector"))
        .collect()
}

/// Trimmed text content of an element.
///
/// Each text node is trimmed and the non-empty pieces are joined with a
/// single space.
pub(super) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the first element matched by the first tier that matches
/// anything below `scope`.
pub(super) fn first_in<'a>(scope: ElementRef<'a>, tiers: &[Selector]) -> Option<ElementRef<'a>> {
    tiers
        .iter()
        .find_map(|selector| scope.select(selector).next())
}

/// Like `first_in`, but searching the whole document.
pub(super) fn first_in_document<'a>(document: &'a Html, tiers: &[Selector]) -> Option<ElementRef<'a>> {
    tiers
        .iter()
        .find_map(|selector| document.select(selector).next())
}

/// Returns every element of the first tier that matches at least once,
/// together with the index of that tier. Tiers are never merged.
pub(super) fn all_of_first_matching_tier<'a>(
    document: &'a Html,
    tiers: &[Selector],
) -> Option<(usize, Vec<ElementRef<'a>>)> {
    tiers.iter().enumerate().find_map(|(tier, selector)| {
        let matches: Vec<_> = document.select(selector).collect();
        (!matches.is_empty()).then_some((tier, matches))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_text_trims_and_joins() {
        let document = Html::parse_fragment("<div>  <span> 8.5 </span>\n<span>/10</span>  </div>");
        let div = first_in_document(&document, &compile(&["div"])).unwrap();
        assert_eq!(element_text(div), "8.5 /10");
    }

    #[test]
    fn test_first_in_respects_tier_order() {
        let document = Html::parse_fragment(
            r#"<div id="scope"><b>bold</b><i>italic</i></div><u>outside</u>"#,
        );
        let scope = first_in_document(&document, &compile(&["#scope"])).unwrap();

        let found = first_in(scope, &compile(&["i", "b"])).unwrap();
        assert_eq!(element_text(found), "italic");

        assert!(first_in(scope, &compile(&["u", "s"])).is_none());
    }

    #[test]
    fn test_first_matching_tier_is_used_exclusively() {
        let document = Html::parse_fragment("<p>a</p><p>b</p><span>c</span>");
        let tiers = compile(&["article", "p", "span"]);

        let (tier, matches) = all_of_first_matching_tier(&document, &tiers).unwrap();
        assert_eq!(tier, 1);
        let texts: Vec<_> = matches.into_iter().map(element_text).collect();
        assert_eq!(texts, vec!["a", "b"]);

        assert!(all_of_first_matching_tier(&document, &compile(&["table"])).is_none());
    }
}
