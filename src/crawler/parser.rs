//! HTML link extraction
//!
//! Turns a fetched document into the absolute URLs of its anchors, in
//! document order. No filtering and no dedup happens here.

use crate::UrlError;
use scraper::{Html, Selector};
use url::Url;

/// Absolute link URLs found in one document, in document order
///
/// Consumed once; duplicates are preserved.
#[derive(Debug)]
pub struct ExtractedLinks {
    links: std::vec::IntoIter<Url>,
}

impl Iterator for ExtractedLinks {
    type Item = Url;

    fn next(&mut self) -> Option<Self::Item> {
        self.links.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.links.size_hint()
    }
}

impl ExactSizeIterator for ExtractedLinks {}

/// Extracts every anchor link from `html`, resolved against `base_url`
///
/// # Extraction Rules
///
/// - The document is walked depth-first in document order
/// - Every `<a>` with an `href` contributes its first `href` value
/// - Each href is resolved against `base_url` with standard reference resolution
/// - Hrefs that fail to resolve are skipped; the rest of the page still counts
/// - No scheme filtering: `mailto:` and friends are returned as-is
///
/// HTML parsing is lenient and never fails; the only error is an unparseable
/// base URL.
///
/// # Example
///
/// ```
/// use link_census::crawler::extract_links;
///
/// let html = r#"<p><a href="/about">About</a> <a href="team">Team</a></p>"#;
/// let links: Vec<String> = extract_links(html, "https://example.com/docs/")
///     .unwrap()
///     .map(|url| url.to_string())
///     .collect();
/// assert_eq!(links, ["https://example.com/about", "https://example.com/docs/team"]);
/// ```
pub fn extract_links(html: &str, base_url: &str) -> Result<ExtractedLinks, UrlError> {
    let base = Url::parse(base_url).map_err(|e| UrlError::Parse(e.to_string()))?;
    let document = Html::parse_document(html);

    let links = anchor_hrefs(&document)
        .into_iter()
        .filter_map(|href| resolve_link(href, &base))
        .collect::<Vec<_>>();

    Ok(ExtractedLinks {
        links: links.into_iter(),
    })
}

/// Collects the `href` of every anchor, in document order
///
/// The tokenizer keeps only the first occurrence of a repeated attribute, so
/// `attr("href")` is the first `href` written on the element.
fn anchor_hrefs(document: &Html) -> Vec<&str> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .collect()
}

/// Resolves an href against the page URL; None if it cannot be resolved
fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    match base.join(href) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::trace!("skipping unresolvable href '{}': {}", href, e);
            None
        }
    }
}
