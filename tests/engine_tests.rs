//! End-to-end engine tests over a scripted page graph
//!
//! The graph used throughout (unless a test builds its own):
//!
//! ```text
//! A -> {B, C}    B -> {T}    C -> {D}    D -> {T}    T -> {}
//! ```

mod common;

use common::{article, scripted_engine, sorted, test_engine_config, ScriptedFetcher};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use wikisteps::engine::PathSearch;
use wikisteps::policy::ArticlePolicy;

fn abc_graph() -> ScriptedFetcher {
    ScriptedFetcher::new()
        .page("A", &["B", "C"])
        .page("B", &["T"])
        .page("C", &["D"])
        .page("D", &["T"])
        .page("T", &[])
}

fn path(titles: &[&str]) -> Vec<String> {
    titles.iter().map(|t| article(t)).collect()
}

#[tokio::test]
async fn test_target_unreachable_in_one_hop() {
    let engine = scripted_engine(abc_graph());
    let outcome = engine
        .find_paths(&article("A"), &article("T"), 1)
        .await
        .unwrap();

    assert!(outcome.paths.is_empty());
    assert!(outcome.termination.is_exhausted());
}

#[tokio::test]
async fn test_single_path_within_two_hops() {
    let engine = scripted_engine(abc_graph());
    let outcome = engine
        .find_paths(&article("A"), &article("T"), 2)
        .await
        .unwrap();

    assert_eq!(outcome.paths, vec![path(&["A", "B", "T"])]);
    assert!(outcome.termination.is_exhausted());
}

#[tokio::test]
async fn test_both_paths_within_three_hops() {
    let engine = scripted_engine(abc_graph());
    let outcome = engine
        .find_paths(&article("A"), &article("T"), 3)
        .await
        .unwrap();

    assert_eq!(
        sorted(outcome.paths),
        sorted(vec![path(&["A", "B", "T"]), path(&["A", "C", "D", "T"])])
    );
}

#[tokio::test]
async fn test_zero_hops_to_self() {
    let engine = scripted_engine(abc_graph());
    let outcome = engine
        .find_paths(&article("A"), &article("A"), 0)
        .await
        .unwrap();

    assert_eq!(outcome.paths, vec![path(&["A"])]);
}

#[tokio::test]
async fn test_self_link_pruned() {
    let fetcher = ScriptedFetcher::new()
        .page("A", &["A", "B"])
        .page("B", &["T"]);
    let engine = scripted_engine(fetcher);

    let outcome = engine
        .find_paths(&article("A"), &article("T"), 2)
        .await
        .unwrap();

    // The A -> A self-link would repeat a node; only A -> B -> T survives.
    assert_eq!(outcome.paths, vec![path(&["A", "B", "T"])]);
}

#[tokio::test]
async fn test_fetch_failure_terminates_run() {
    let fetcher = ScriptedFetcher::new()
        .page("A", &["B", "C"])
        .failing("B")
        .page("C", &["D"])
        .page("D", &["T"]);
    let engine = scripted_engine(fetcher);

    // The run must terminate even though a page fails (no hang), and any
    // paths it did find must be real ones.
    let outcome = tokio::time::timeout(
        Duration::from_secs(10),
        engine.find_paths(&article("A"), &article("T"), 3),
    )
    .await
    .expect("search must terminate on fatal errors")
    .unwrap();

    assert!(outcome.termination.failure().is_some());
    for found in &outcome.paths {
        assert_eq!(found, &path(&["A", "C", "D", "T"]));
    }
}

#[tokio::test]
async fn test_dead_end_graph_finds_nothing() {
    let fetcher = ScriptedFetcher::new().page("A", &["B"]).page("B", &[]);
    let engine = scripted_engine(fetcher);

    let outcome = engine
        .find_paths(&article("A"), &article("T"), 3)
        .await
        .unwrap();

    assert!(outcome.paths.is_empty());
    assert!(outcome.termination.is_exhausted());
}

#[tokio::test]
async fn test_diamond_returns_both_sequences() {
    // Two distinct orderings reach the target through the same middle
    // article; both are distinct paths and both are returned.
    let fetcher = ScriptedFetcher::new()
        .page("A", &["B", "C"])
        .page("B", &["D"])
        .page("C", &["D"])
        .page("D", &["T"]);
    let engine = scripted_engine(fetcher);

    let outcome = engine
        .find_paths(&article("A"), &article("T"), 3)
        .await
        .unwrap();

    assert_eq!(
        sorted(outcome.paths),
        sorted(vec![path(&["A", "B", "D", "T"]), path(&["A", "C", "D", "T"])])
    );
}

#[tokio::test]
async fn test_results_monotone_in_steps() {
    let engine2 = scripted_engine(abc_graph());
    let engine3 = scripted_engine(abc_graph());

    let smaller = engine2
        .find_paths(&article("A"), &article("T"), 2)
        .await
        .unwrap();
    let larger = engine3
        .find_paths(&article("A"), &article("T"), 3)
        .await
        .unwrap();

    for found in &smaller.paths {
        assert!(larger.paths.contains(found));
    }
}

#[tokio::test]
async fn test_deterministic_fetcher_gives_stable_result_set() {
    let engine = scripted_engine(abc_graph());

    let first = engine
        .find_paths(&article("A"), &article("T"), 3)
        .await
        .unwrap();
    let second = engine
        .find_paths(&article("A"), &article("T"), 3)
        .await
        .unwrap();

    assert_eq!(sorted(first.paths), sorted(second.paths));
}

#[tokio::test]
async fn test_slow_fetcher_hits_timeout_quickly() {
    let fetcher = ScriptedFetcher::new()
        .page("A", &["B"])
        .page("B", &["T"])
        .with_delay(Duration::from_secs(30));

    let mut config = test_engine_config();
    config.timeout_ms = 100;
    let engine = PathSearch::with_fetcher(config, ArticlePolicy::new(), Arc::new(fetcher));

    let started = std::time::Instant::now();
    let outcome = engine
        .find_paths(&article("A"), &article("T"), 2)
        .await
        .unwrap();

    assert!(outcome.termination.is_timeout());
    assert!(outcome.paths.is_empty());
    // Termination and drain must not wait out the slow fetch.
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn test_engine_reusable_after_a_run() {
    let engine = scripted_engine(abc_graph());

    let first = engine
        .find_paths(&article("A"), &article("T"), 2)
        .await
        .unwrap();
    assert_eq!(first.paths.len(), 1);

    // All workers of the first run are gone; a second run on the same
    // engine starts clean and sees the same graph.
    let second = engine
        .find_paths(&article("A"), &article("T"), 2)
        .await
        .unwrap();
    assert_eq!(second.paths, first.paths);
}

#[tokio::test]
async fn test_no_fetches_beyond_expansions() {
    let fetcher = abc_graph();
    let fetch_count = fetcher.fetch_count.clone();
    let engine = scripted_engine(fetcher);

    engine
        .find_paths(&article("A"), &article("T"), 2)
        .await
        .unwrap();

    // Two hops: A is fetched, then B and C as expansions. T is recognized
    // as the target without a fetch and D is out of budget.
    assert_eq!(fetch_count.load(Ordering::SeqCst), 3);
}
