//! Page fetching
//!
//! The engine talks to the network through the [`PageFetcher`] trait so
//! tests can script page graphs without sockets. The production
//! implementation wraps a `reqwest` client behind a shared semaphore that
//! bounds concurrent outbound requests across the whole process.

use crate::config::FetcherConfig;
use crate::engine::shutdown::ExitSignal;
use crate::FetchError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Retrieves the HTML body for an article URL
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns its body
    ///
    /// Implementations that queue for shared resources must also watch
    /// `exit` while waiting and give up with [`FetchError::Cancelled`]
    /// before performing any I/O once it fires.
    async fn fetch(&self, url: &str, exit: &ExitSignal) -> Result<String, FetchError>;
}

/// The production fetcher: reqwest gated by a shared semaphore
///
/// One semaphore permit is held for the duration of each request, so at most
/// `fetch_concurrency` requests are ever in flight at once, no matter how
/// many workers are searching.
pub struct WikipediaFetcher {
    client: reqwest::Client,
    semaphore: Arc<Semaphore>,
}

impl WikipediaFetcher {
    /// Builds a fetcher from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Request timeout and user agent
    /// * `fetch_concurrency` - Capacity of the request semaphore
    pub fn new(config: &FetcherConfig, fetch_concurrency: usize) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            semaphore: Arc::new(Semaphore::new(fetch_concurrency)),
        })
    }

    /// Remaining semaphore capacity; equals the configured concurrency
    /// whenever no request is in flight
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}

#[async_trait]
impl PageFetcher for WikipediaFetcher {
    async fn fetch(&self, url: &str, exit: &ExitSignal) -> Result<String, FetchError> {
        if exit.is_triggered() {
            return Err(FetchError::Cancelled);
        }

        // Queue for a request slot, but give up as soon as exit fires.
        let _permit = tokio::select! {
            permit = self.semaphore.clone().acquire_owned() => {
                permit.map_err(|_| FetchError::Cancelled)?
            }
            () = exit.triggered() => return Err(FetchError::Cancelled),
        };

        tracing::trace!("fetching {}", url);

        let request = self
            .client
            .get(url)
            .build()
            .map_err(|source| FetchError::Build {
                url: url.to_string(),
                source,
            })?;

        let response =
            self.client
                .execute(request)
                .await
                .map_err(|source| FetchError::Transport {
                    url: url.to_string(),
                    source,
                })?;

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        if body.is_empty() {
            return Err(FetchError::EmptyBody {
                url: url.to_string(),
            });
        }

        tracing::trace!("fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }
}
