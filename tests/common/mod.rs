//! Shared test helpers: a scripted page graph behind the fetcher seam

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wikisteps::config::EngineConfig;
use wikisteps::engine::{ExitSignal, PageFetcher, PathSearch};
use wikisteps::policy::ArticlePolicy;
use wikisteps::FetchError;

/// Absolute article URL for a short title
pub fn article(title: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", title)
}

/// A minimal article body linking to the given titles
pub fn page_html(titles: &[&str]) -> String {
    let links: String = titles
        .iter()
        .map(|t| format!(r#"<a href="/wiki/{t}">{t}</a>"#))
        .collect();
    format!("<html><body><p>article text</p>{}</body></html>", links)
}

/// Serves a scripted page graph without touching the network
///
/// Built with the builder methods, then handed to the engine as its
/// fetcher. Unknown and explicitly failing URLs produce an empty-body
/// error; a configurable delay simulates slow pages. The counters record
/// how the engine drove the fetcher.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    delay: Duration,
    pub fetch_count: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts an article whose body links to `titles`
    pub fn page(mut self, title: &str, titles: &[&str]) -> Self {
        self.pages.insert(article(title), page_html(titles));
        self
    }

    /// Scripts an article whose fetch fails
    pub fn failing(mut self, title: &str) -> Self {
        self.failing.insert(article(title));
        self
    }

    /// Adds a fixed delay to every fetch
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str, _exit: &ExitSignal) -> Result<String, FetchError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = if self.failing.contains(url) {
            Err(FetchError::EmptyBody {
                url: url.to_string(),
            })
        } else {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::EmptyBody {
                    url: url.to_string(),
                })
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Engine config tuned for fast tests: short quiescence ticks, a handful
/// of workers, generous timeout
pub fn test_engine_config() -> EngineConfig {
    EngineConfig {
        timeout_ms: 5_000,
        num_workers: 4,
        quiescence_interval_ms: 50,
        ..EngineConfig::default()
    }
}

/// Builds a search engine over a scripted graph
pub fn scripted_engine(fetcher: ScriptedFetcher) -> PathSearch {
    PathSearch::with_fetcher(test_engine_config(), ArticlePolicy::new(), Arc::new(fetcher))
}

/// Sorts a path list so runs with different schedules compare equal
pub fn sorted(mut paths: Vec<Vec<String>>) -> Vec<Vec<String>> {
    paths.sort();
    paths
}
