//! Article-URL admissibility policy
//!
//! Pure predicates deciding whether a URL (or an in-page `href`) counts as a
//! traversable Wikipedia article link. Namespace pages (`File:`, `Category:`,
//! `Special:`, ...) and block-listed prefixes are rejected.

use regex::Regex;
use std::sync::LazyLock;

/// Scheme and host every article URL must carry
pub const WIKIPEDIA_DOMAIN: &str = "https://en.wikipedia.org";

/// Path prefix of every article page
pub const WIKI_PREFIX: &str = "/wiki/";

/// Prefixes that are never traversed, regardless of admissibility
pub const DEFAULT_BLOCK_PREFIXES: &[&str] = &["/wiki/Main_Page"];

// Namespace pages look like /wiki/Category:Something; articles never
// contain a colon directly after the first path segment.
static NAMESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/wiki/\w+:.*").expect("namespace pattern compiles"));

/// Decides which URLs the search may traverse
///
/// The policy is a pure function of the URL string: an exact prefix check,
/// a namespace-page exclusion, and a configurable block list. It performs no
/// URL parsing or normalization.
#[derive(Debug, Clone)]
pub struct ArticlePolicy {
    block_prefixes: Vec<String>,
}

impl ArticlePolicy {
    /// Creates a policy with the default block list
    pub fn new() -> Self {
        Self::with_block_prefixes(&[])
    }

    /// Creates a policy with additional block-list entries
    ///
    /// The default entries are always present; `extra` is appended.
    pub fn with_block_prefixes(extra: &[String]) -> Self {
        let mut block_prefixes: Vec<String> = DEFAULT_BLOCK_PREFIXES
            .iter()
            .map(|p| p.to_string())
            .collect();
        block_prefixes.extend(extra.iter().cloned());
        Self { block_prefixes }
    }

    /// Checks whether an absolute URL is a traversable article link
    ///
    /// A URL qualifies iff it starts with `https://en.wikipedia.org/wiki/`
    /// and its path component passes the relative checks.
    ///
    /// # Examples
    ///
    /// ```
    /// use wikisteps::policy::ArticlePolicy;
    ///
    /// let policy = ArticlePolicy::new();
    /// assert!(policy.is_absolute_article("https://en.wikipedia.org/wiki/Rust"));
    /// assert!(!policy.is_absolute_article("https://en.wikipedia.org/wiki/Special:Random"));
    /// assert!(!policy.is_absolute_article("https://de.wikipedia.org/wiki/Rost"));
    /// ```
    pub fn is_absolute_article(&self, url: &str) -> bool {
        match url.strip_prefix(WIKIPEDIA_DOMAIN) {
            Some(path) => self.is_relative_article(path),
            None => false,
        }
    }

    /// Checks whether an in-page `href` is a traversable article link
    ///
    /// The URI must start with `/wiki/`, must not be a namespace page, and
    /// must not start with a block-listed prefix.
    pub fn is_relative_article(&self, uri: &str) -> bool {
        if !uri.starts_with(WIKI_PREFIX) {
            return false;
        }
        if NAMESPACE_RE.is_match(uri) {
            return false;
        }
        !self.block_prefixes.iter().any(|p| uri.starts_with(p))
    }

    /// Turns a relative article URI into an absolute URL
    pub fn to_absolute(uri: &str) -> String {
        format!("{}{}", WIKIPEDIA_DOMAIN, uri)
    }
}

impl Default for ArticlePolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_article_accepted() {
        let policy = ArticlePolicy::new();
        assert!(policy.is_absolute_article("https://en.wikipedia.org/wiki/Rust_(programming_language)"));
        assert!(policy.is_absolute_article("https://en.wikipedia.org/wiki/Machine_translation"));
    }

    #[test]
    fn test_wrong_host_rejected() {
        let policy = ArticlePolicy::new();
        assert!(!policy.is_absolute_article("https://de.wikipedia.org/wiki/Rost"));
        assert!(!policy.is_absolute_article("http://en.wikipedia.org/wiki/Rust"));
        assert!(!policy.is_absolute_article("https://example.com/wiki/Rust"));
    }

    #[test]
    fn test_non_wiki_path_rejected() {
        let policy = ArticlePolicy::new();
        assert!(!policy.is_absolute_article("https://en.wikipedia.org/w/index.php?title=Rust"));
        assert!(!policy.is_absolute_article("https://en.wikipedia.org/"));
    }

    #[test]
    fn test_namespace_pages_rejected() {
        let policy = ArticlePolicy::new();
        assert!(!policy.is_relative_article("/wiki/File:Example.jpg"));
        assert!(!policy.is_relative_article("/wiki/Category:Programming_languages"));
        assert!(!policy.is_relative_article("/wiki/Help:Contents"));
        assert!(!policy.is_relative_article("/wiki/Special:Random"));
        assert!(!policy.is_absolute_article("https://en.wikipedia.org/wiki/Talk:Rust"));
    }

    #[test]
    fn test_colon_later_in_title_accepted() {
        // Only a colon directly after the first path segment marks a
        // namespace; titles may contain colons further in.
        let policy = ArticlePolicy::new();
        assert!(policy.is_relative_article("/wiki/Dr._Strangelove_or:_How_I_Learned"));
    }

    #[test]
    fn test_main_page_blocked() {
        let policy = ArticlePolicy::new();
        assert!(!policy.is_relative_article("/wiki/Main_Page"));
        assert!(!policy.is_absolute_article("https://en.wikipedia.org/wiki/Main_Page"));
    }

    #[test]
    fn test_block_prefix_matches_by_prefix() {
        let policy = ArticlePolicy::new();
        assert!(!policy.is_relative_article("/wiki/Main_Page/Errors"));
    }

    #[test]
    fn test_extra_block_prefixes() {
        let policy = ArticlePolicy::with_block_prefixes(&["/wiki/Sandbox".to_string()]);
        assert!(!policy.is_relative_article("/wiki/Sandbox"));
        assert!(!policy.is_relative_article("/wiki/Sandbox_2"));
        assert!(policy.is_relative_article("/wiki/Rust"));
    }

    #[test]
    fn test_relative_article_accepted() {
        let policy = ArticlePolicy::new();
        assert!(policy.is_relative_article("/wiki/Rust"));
        assert!(policy.is_relative_article("/wiki/C%2B%2B"));
    }

    #[test]
    fn test_non_wiki_uri_rejected() {
        let policy = ArticlePolicy::new();
        assert!(!policy.is_relative_article("/w/index.php"));
        assert!(!policy.is_relative_article("wiki/Rust"));
        assert!(!policy.is_relative_article("#cite_note-1"));
        assert!(!policy.is_relative_article("https://en.wikipedia.org/wiki/Rust"));
    }

    #[test]
    fn test_to_absolute() {
        assert_eq!(
            ArticlePolicy::to_absolute("/wiki/Rust"),
            "https://en.wikipedia.org/wiki/Rust"
        );
    }
}
