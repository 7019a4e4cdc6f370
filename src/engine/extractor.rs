//! Article link extraction
//!
//! Parses a fetched page body and emits the set of unique admissible
//! outbound article URLs, absolutized against the Wikipedia domain.

use crate::policy::ArticlePolicy;
use crate::ExtractError;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Extracts every admissible article link from an HTML body
///
/// Walks all `<a href="...">` elements; every href that passes relative
/// admissibility is absolutized and collected. Duplicates within one page
/// collapse into a single entry.
///
/// # Example
///
/// ```
/// use wikisteps::engine::extract_article_links;
/// use wikisteps::policy::ArticlePolicy;
///
/// let html = r#"<html><body><a href="/wiki/Rust">Rust</a></body></html>"#;
/// let links = extract_article_links(html, &ArticlePolicy::new()).unwrap();
/// assert!(links.contains("https://en.wikipedia.org/wiki/Rust"));
/// ```
pub fn extract_article_links(
    html: &str,
    policy: &ArticlePolicy,
) -> Result<HashSet<String>, ExtractError> {
    let document = Html::parse_document(html);

    let selector =
        Selector::parse("a[href]").map_err(|e| ExtractError::Parse(e.to_string()))?;

    let mut links = HashSet::new();
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if policy.is_relative_article(href) {
                links.insert(ArticlePolicy::to_absolute(href));
            }
        }
    }

    Ok(links)
}
