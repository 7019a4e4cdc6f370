//! The path-search engine
//!
//! A fixed pool of workers consumes jobs (partial paths with a hop budget)
//! from a shared queue, fetches each path's last article, extracts its
//! admissible outbound links, and hands the completed job to a supervisor.
//! The supervisor records paths that reached the target, re-enqueues
//! expansions while budget remains, and ends the run on timeout, fatal
//! error, or quiescence.

mod extractor;
mod fetcher;
mod job;
mod shutdown;
mod supervisor;
mod worker;

pub use extractor::extract_article_links;
pub use fetcher::{PageFetcher, WikipediaFetcher};
pub use job::{Job, Path};
pub use shutdown::ExitSignal;
pub use supervisor::Termination;

use crate::config::{Config, EngineConfig};
use crate::policy::ArticlePolicy;
use crate::WikiStepsError;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use supervisor::Supervisor;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use worker::{run_worker, WorkerContext};

/// Result of a completed search run
///
/// `paths` is every start→target chain found, in discovery order. When the
/// run timed out or failed, the list holds whatever was found up to that
/// point; an empty list on a clean run simply means no path exists within
/// the budget.
#[derive(Debug)]
pub struct SearchOutcome {
    pub paths: Vec<Path>,
    pub termination: Termination,
}

/// The search engine façade
///
/// Owns the configuration, the URL policy, and the page fetcher; each call
/// to [`find_paths`](Self::find_paths) gets fresh channels, workers, and a
/// supervisor, while the fetcher (and with it the request semaphore) is
/// shared across concurrent searches.
pub struct PathSearch {
    engine: EngineConfig,
    policy: Arc<ArticlePolicy>,
    fetcher: Arc<dyn PageFetcher>,
}

impl PathSearch {
    /// Builds an engine that fetches live Wikipedia pages
    pub fn new(config: &Config) -> crate::Result<Self> {
        let fetcher = WikipediaFetcher::new(&config.fetcher, config.engine.fetch_concurrency)?;
        Ok(Self::with_fetcher(
            config.engine.clone(),
            ArticlePolicy::with_block_prefixes(&config.policy.block_prefixes),
            Arc::new(fetcher),
        ))
    }

    /// Builds an engine around any [`PageFetcher`] implementation
    pub fn with_fetcher(
        engine: EngineConfig,
        policy: ArticlePolicy,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        Self {
            engine,
            policy: Arc::new(policy),
            fetcher,
        }
    }

    /// Finds every simple path of at most `steps` hops from `start` to
    /// `target`
    ///
    /// Validation failures (`InvalidUrl`, `InvalidSteps`) return
    /// synchronously without any worker activity. Everything else comes
    /// back as a [`SearchOutcome`] whose termination says whether the
    /// search space was exhausted, the timeout fired, or a worker hit a
    /// fatal error; partial results survive in the last two cases.
    ///
    /// # Arguments
    ///
    /// * `start` - Absolute article URL the paths begin at
    /// * `target` - Absolute article URL the paths must reach
    /// * `steps` - Maximum number of hops (edges); the seed path has zero
    pub async fn find_paths(
        &self,
        start: &str,
        target: &str,
        steps: i64,
    ) -> crate::Result<SearchOutcome> {
        if !self.policy.is_absolute_article(start) {
            return Err(WikiStepsError::InvalidUrl(start.to_string()));
        }
        if !self.policy.is_absolute_article(target) {
            return Err(WikiStepsError::InvalidUrl(target.to_string()));
        }
        if steps < 0 || steps > i64::from(self.engine.max_steps) {
            return Err(WikiStepsError::InvalidSteps {
                got: steps,
                max: self.engine.max_steps,
            });
        }
        let steps = steps as u32;

        // The simple-path invariant forbids revisiting the start, so the
        // zero-hop path is the only one that can ever end there.
        if start == target {
            return Ok(SearchOutcome {
                paths: vec![vec![start.to_string()]],
                termination: Termination::Exhausted,
            });
        }
        if steps == 0 {
            return Ok(SearchOutcome {
                paths: Vec::new(),
                termination: Termination::Exhausted,
            });
        }

        tracing::info!(
            "starting search: start={}, target={}, steps={}, workers={}, timeout={:?}",
            start,
            target,
            steps,
            self.engine.num_workers,
            self.engine.timeout()
        );

        let num_workers = self.engine.num_workers;
        let (jobs_tx, jobs_rx) = mpsc::channel(job_queue_capacity(steps));
        let (completed_tx, completed_rx) = mpsc::channel(100 * num_workers);
        let (errors_tx, errors_rx) = mpsc::channel(num_workers);
        let exit = ExitSignal::new();
        let in_flight = Arc::new(AtomicUsize::new(1));
        let idle_workers = Arc::new(AtomicUsize::new(num_workers));

        // Seed while the receiver is still in hand; this cannot fail.
        if jobs_tx.send(Job::seed(start, steps)).await.is_err() {
            tracing::error!("failed to seed the job queue");
        }

        let jobs_rx = Arc::new(Mutex::new(jobs_rx));
        let mut workers = JoinSet::new();
        for id in 0..num_workers {
            let ctx = WorkerContext {
                jobs: jobs_rx.clone(),
                completed_tx: completed_tx.clone(),
                errors_tx: errors_tx.clone(),
                fetcher: self.fetcher.clone(),
                policy: self.policy.clone(),
                exit: exit.clone(),
                idle_workers: idle_workers.clone(),
            };
            workers.spawn(run_worker(id, ctx));
        }
        // Workers hold their own clones.
        drop(completed_tx);
        drop(errors_tx);

        let supervisor = Supervisor {
            target: target.to_string(),
            jobs_tx,
            completed_rx,
            errors_rx,
            exit,
            in_flight,
            idle_workers,
            num_workers,
            timeout: self.engine.timeout(),
            check_interval: self.engine.quiescence_interval(),
            results: Vec::new(),
        };

        let (paths, termination) = supervisor.run(workers).await;
        Ok(SearchOutcome { paths, termination })
    }
}

/// Job queue capacity for a given hop budget
///
/// Sized to a branching-aware bound of roughly 10^steps outstanding
/// expansions, clamped so small budgets still get slack and large ones
/// stay sane.
fn job_queue_capacity(steps: u32) -> usize {
    10usize.saturating_pow(steps).clamp(1024, 10_000_000)
}
