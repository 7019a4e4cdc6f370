//! Search supervision and termination
//!
//! The supervisor owns the decision of when a search ends. It drains
//! completed jobs, records target hits, re-enqueues expansions while budget
//! remains, and terminates on the whole-search timeout, the first fatal
//! worker error, or quiescence. Termination triggers the exit broadcast
//! exactly once, then the drain phase joins every worker and harvests any
//! target hits still in flight.

use crate::engine::job::{Job, Path};
use crate::engine::shutdown::ExitSignal;
use crate::SearchError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Why a search run ended
///
/// `Exhausted` and `TimedOut` are successful completions (the path list is
/// complete or partial, respectively); `Failed` carries the first fatal
/// worker error, with any paths found before it preserved alongside.
#[derive(Debug)]
pub enum Termination {
    /// Every reachable path within budget was explored
    Exhausted,
    /// The whole-search timer fired; results are a valid partial set
    TimedOut,
    /// A worker hit a fatal fetch or extract error
    Failed(SearchError),
}

impl Termination {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut)
    }

    /// The fatal error, if the run failed
    pub fn failure(&self) -> Option<&SearchError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Consumes completed jobs and decides when the search ends
pub(crate) struct Supervisor {
    pub target: String,
    pub jobs_tx: mpsc::Sender<Job>,
    pub completed_rx: mpsc::Receiver<Job>,
    pub errors_rx: mpsc::Receiver<SearchError>,
    pub exit: ExitSignal,
    /// Jobs enqueued but not yet fully processed here; 0 means nothing is
    /// queued, being worked on, or awaiting processing
    pub in_flight: Arc<AtomicUsize>,
    pub idle_workers: Arc<AtomicUsize>,
    pub num_workers: usize,
    pub timeout: Duration,
    pub check_interval: Duration,
    pub results: Vec<Path>,
}

impl Supervisor {
    /// Runs the search to completion: monitor, signal exit, drain
    pub async fn run(mut self, workers: JoinSet<()>) -> (Vec<Path>, Termination) {
        let termination = self.monitor().await;
        self.exit.trigger();
        self.drain(workers).await;

        match &termination {
            Termination::Exhausted => {
                tracing::info!("search exhausted, {} path(s) found", self.results.len())
            }
            Termination::TimedOut => tracing::info!(
                "search timed out after {:?}, {} path(s) found",
                self.timeout,
                self.results.len()
            ),
            Termination::Failed(err) => tracing::warn!("search failed: {}", err),
        }

        (self.results, termination)
    }

    /// The running phase: returns as soon as a terminal cause occurs
    async fn monitor(&mut self) -> Termination {
        let deadline = tokio::time::sleep(self.timeout);
        tokio::pin!(deadline);

        let mut check = tokio::time::interval_at(
            Instant::now() + self.check_interval,
            self.check_interval,
        );

        // Quiescence must hold across one full check tick: a worker that
        // dequeued a job may be about to push more work, so a single
        // observation proves nothing.
        let mut quiet = false;

        loop {
            tokio::select! {
                biased;

                () = &mut deadline => {
                    tracing::debug!("whole-search timeout fired");
                    return Termination::TimedOut;
                }

                Some(err) = self.errors_rx.recv() => {
                    tracing::debug!("terminal worker error: {}", err);
                    return Termination::Failed(err);
                }

                Some(job) = self.completed_rx.recv() => {
                    self.process_completed(job).await;
                }

                _ = check.tick() => {
                    if self.is_quiescent() {
                        if quiet {
                            tracing::debug!("quiescence confirmed, search space exhausted");
                            return Termination::Exhausted;
                        }
                        quiet = true;
                    } else {
                        quiet = false;
                    }
                }
            }
        }
    }

    /// Records target hits and re-enqueues expansions for one completed job
    async fn process_completed(&mut self, job: Job) {
        for url in &job.links {
            if url == &self.target {
                let mut path = job.path.clone();
                path.push(url.clone());
                tracing::debug!("found a valid path: [{}]", path.join(", "));
                self.results.push(path);
            } else if job.steps_remaining > 1 {
                let next = Job::expanded(&job, url);
                self.in_flight.fetch_add(1, Ordering::SeqCst);
                if self.jobs_tx.send(next).await.is_err() {
                    self.in_flight.fetch_sub(1, Ordering::SeqCst);
                }
            } else {
                tracing::trace!("dead end, path ran out of steps at {}", url);
            }
        }

        // The completed job itself is now fully accounted for.
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    /// True when no job is queued, in a worker's hands, or awaiting
    /// processing, and every worker reports idle
    fn is_quiescent(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) == 0
            && self.idle_workers.load(Ordering::SeqCst) == self.num_workers
    }

    /// Joins all workers, harvesting target hits from in-flight completions
    async fn drain(&mut self, mut workers: JoinSet<()>) {
        while !workers.is_empty() {
            tokio::select! {
                Some(joined) = workers.join_next() => {
                    if let Err(err) = joined {
                        tracing::warn!("worker task ended abnormally: {}", err);
                    }
                }
                Some(job) = self.completed_rx.recv() => self.harvest(job),
            }
        }

        // Anything still buffered was pushed before the last worker left.
        while let Ok(job) = self.completed_rx.try_recv() {
            self.harvest(job);
        }
    }

    /// During drain only target hits matter; nothing is re-enqueued
    fn harvest(&mut self, job: Job) {
        for url in &job.links {
            if url == &self.target {
                let mut path = job.path.clone();
                path.push(url.clone());
                tracing::debug!("harvested a valid path during drain: [{}]", path.join(", "));
                self.results.push(path);
            }
        }
    }
}
