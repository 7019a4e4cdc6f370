//! Search workers
//!
//! Each worker is a cooperative loop over the exit signal and the shared
//! job queue: fetch the path's last article, extract its admissible links,
//! drop any link already on the path, and hand the completed job back to
//! the supervisor. Errors go to the error channel; the worker keeps
//! serving jobs until the exit signal fires.

use crate::engine::extractor::extract_article_links;
use crate::engine::fetcher::PageFetcher;
use crate::engine::job::Job;
use crate::engine::shutdown::ExitSignal;
use crate::policy::ArticlePolicy;
use crate::{FetchError, SearchError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Everything one worker needs; cloned once per worker task
#[derive(Clone)]
pub(crate) struct WorkerContext {
    pub jobs: Arc<Mutex<mpsc::Receiver<Job>>>,
    pub completed_tx: mpsc::Sender<Job>,
    pub errors_tx: mpsc::Sender<SearchError>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub policy: Arc<ArticlePolicy>,
    pub exit: ExitSignal,
    pub idle_workers: Arc<AtomicUsize>,
}

/// Runs one worker until the exit signal fires or the job queue closes
pub(crate) async fn run_worker(id: usize, ctx: WorkerContext) {
    tracing::debug!("worker {} started", id);
    loop {
        let job = tokio::select! {
            () = ctx.exit.triggered() => {
                tracing::debug!("worker {} received exit signal, closing", id);
                return;
            }
            job = recv_job(&ctx.jobs) => match job {
                Some(job) => job,
                None => {
                    tracing::debug!("worker {} found the job queue closed", id);
                    return;
                }
            },
        };

        ctx.idle_workers.fetch_sub(1, Ordering::SeqCst);
        process_job(id, &ctx, job).await;
        ctx.idle_workers.fetch_add(1, Ordering::SeqCst);
    }
}

/// Receives the next job from the shared queue
///
/// The receiver lock is held only while waiting; dropping this future (when
/// the enclosing select picks the exit branch) releases it.
async fn recv_job(jobs: &Mutex<mpsc::Receiver<Job>>) -> Option<Job> {
    jobs.lock().await.recv().await
}

/// Fetch, extract, filter, complete: one job from start to finish
async fn process_job(id: usize, ctx: &WorkerContext, mut job: Job) {
    let Some(next_url) = job.current_url().map(str::to_string) else {
        // Jobs are only built via seed/expanded, so the path is never empty.
        tracing::warn!("worker {} dropped a job with an empty path", id);
        return;
    };

    // A fetch that outlives the exit signal is abandoned; the run is over
    // and nobody would read its result.
    let fetched = tokio::select! {
        biased;
        result = ctx.fetcher.fetch(&next_url, &ctx.exit) => result,
        () = ctx.exit.triggered() => Err(FetchError::Cancelled),
    };

    let body = match fetched {
        Ok(body) => body,
        Err(FetchError::Cancelled) => {
            tracing::debug!("worker {} cancelled while fetching {}", id, next_url);
            job.links.clear();
            let _ = ctx.completed_tx.send(job).await;
            return;
        }
        Err(err) => {
            tracing::debug!("worker {} failed to fetch {}: {}", id, next_url, err);
            // First error wins; if the channel is full a terminal error is
            // already on its way to the supervisor.
            let _ = ctx.errors_tx.try_send(err.into());
            return;
        }
    };

    let links = match extract_article_links(&body, &ctx.policy) {
        Ok(links) => links,
        Err(err) => {
            tracing::debug!("worker {} failed to extract links from {}: {}", id, next_url, err);
            let _ = ctx.errors_tx.try_send(err.into());
            return;
        }
    };

    let found = links.len();
    job.links = links
        .into_iter()
        .filter(|url| !job.path.contains(url))
        .collect();

    tracing::trace!(
        "worker {} completed {}: {} links, {} new",
        id,
        next_url,
        found,
        job.links.len()
    );

    if ctx.completed_tx.send(job).await.is_err() {
        tracing::debug!("worker {} found the completed queue closed", id);
    }
}
