//! WikiSteps main entry point
//!
//! Runs the path-finder either as an HTTP service or as a one-shot search
//! that prints its result as JSON.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wikisteps::config::{load_config, Config};
use wikisteps::engine::{PathSearch, Termination};
use wikisteps::server;

/// WikiSteps: find link chains between Wikipedia articles
///
/// Searches for every simple path of at most `steps` in-article links from
/// a start article to a target article. Run with `--serve` to expose the
/// search over HTTP, or pass `--start`, `--target`, and `--steps` for a
/// one-shot search on the command line.
#[derive(Parser, Debug)]
#[command(name = "wikisteps")]
#[command(version)]
#[command(about = "Find link chains between Wikipedia articles", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run the HTTP service
    #[arg(long, conflicts_with_all = ["start", "target", "steps"])]
    serve: bool,

    /// Start article URL for a one-shot search
    #[arg(long, requires = "target", requires = "steps")]
    start: Option<String>,

    /// Target article URL for a one-shot search
    #[arg(long, requires = "start")]
    target: Option<String>,

    /// Maximum number of hops for a one-shot search
    #[arg(long, requires = "start")]
    steps: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if cli.serve {
        server::serve(&config).await?;
        return Ok(());
    }

    match (cli.start, cli.target, cli.steps) {
        (Some(start), Some(target), Some(steps)) => {
            run_search(&config, &start, &target, steps).await
        }
        _ => Err("pass --serve to run the service, or --start, --target and --steps \
                  for a one-shot search"
            .into()),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wikisteps=info,warn"),
            1 => EnvFilter::new("wikisteps=debug,info"),
            2 => EnvFilter::new("wikisteps=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs a single search and prints the result as JSON
async fn run_search(
    config: &Config,
    start: &str,
    target: &str,
    steps: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let search = PathSearch::new(config)?;
    let outcome = search.find_paths(start, target, steps).await?;

    if let Termination::Failed(err) = &outcome.termination {
        return Err(format!("search failed: {}", err).into());
    }
    if outcome.termination.is_timeout() {
        tracing::warn!("search timed out; the path list below is partial");
    }

    let response = server::StepsResponse {
        start: start.to_string(),
        target: target.to_string(),
        steps,
        valid_paths: outcome.paths,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
