//! Link-Sleuth main entry point
//!
//! This is the command-line interface for the Link-Sleuth site crawler.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use link_sleuth::config::{load_config, Config};
use link_sleuth::crawler::{self, CrawlReport, CrawlRequest};
use link_sleuth::output::{render_json, render_text, write_results_log};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Link-Sleuth: search a site or hunt for its dead links
///
/// Link-Sleuth crawls a website from a seed URL, following same-host links
/// up to a bounded depth, and reports either matches for a search string or
/// links whose targets are dead.
#[derive(Parser, Debug)]
#[command(name = "link-sleuth")]
#[command(version)]
#[command(about = "Search a site or find its dead links", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// How many link hops to follow from the seed
    #[arg(short, long, default_value_t = 1)]
    depth: u32,

    /// What to look for
    #[arg(short, long, value_enum, default_value_t = Mode::Search)]
    mode: Mode,

    /// Text to search for in hrefs and page text (search mode)
    #[arg(short, long, default_value = "")]
    search: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Do not write a result file
    #[arg(long)]
    no_log: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Report hrefs and text containing the search string
    Search,
    /// Report same-host links that answer with 4xx/5xx or not at all
    Dead,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(cli.config.as_deref()).context("Failed to load configuration")?;

    let request = match cli.mode {
        Mode::Search => CrawlRequest::search(&cli.url, cli.depth, &cli.search),
        Mode::Dead => CrawlRequest::dead_links(&cli.url, cli.depth),
    };

    let report = crawler::crawl(&config.crawler, &request).await?;
    print!("{}", render(&report, cli.json)?);

    if !cli.no_log {
        // The crawl already succeeded; a failed log write is reported, not fatal.
        match write_results_log(
            &config.output.results_dir,
            &report,
            config.output.keep_results,
        ) {
            Ok(path) => tracing::info!("Results written to {}", path.display()),
            Err(e) => tracing::error!("Failed to write results file: {}", e),
        }
    }

    Ok(())
}

/// Loads the configuration file if one was given, otherwise the defaults
fn resolve_config(path: Option<&Path>) -> link_sleuth::Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            Ok(load_config(path)?)
        }
        None => Ok(Config::default()),
    }
}

/// Formats a report for stdout
fn render(report: &CrawlReport, json: bool) -> link_sleuth::Result<String> {
    if json {
        Ok(format!("{}\n", render_json(report)?))
    } else {
        Ok(render_text(report))
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_sleuth=info,warn"),
            1 => EnvFilter::new("link_sleuth=debug,info"),
            2 => EnvFilter::new("link_sleuth=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
