//! hnsearch CLI
//!
//! Launches the interactive TUI by default; the `search` subcommand runs
//! a single query and prints the results.

use clap::{Parser, Subcommand};
use console::style;
use hnsearch::{format_count, ClientConfig, FilePrefs, SearchClient};
use indicatif::HumanDuration;
use std::sync::Arc;
use std::time::Instant;

/// hnsearch - Hacker News story search
#[derive(Parser)]
#[command(name = "hnsearch")]
#[command(author = "hnsearch Contributors")]
#[command(version)]
#[command(about = "Search Hacker News stories from the terminal", long_about = None)]
struct Cli {
    /// Search API endpoint
    #[arg(long, global = true, default_value = hnsearch::API_ENDPOINT)]
    endpoint: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search and print the results
    Search {
        /// Search term (use -- before a term that starts with -)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Maximum results to print
        #[arg(short, long, default_value = "20")]
        max: usize,
    },
}

fn main() {
    init_logging();
    tracing::info!(version = hnsearch::VERSION, "hnsearch starting up");

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Search { query, max }) => cmd_search(&cli.endpoint, &query, max),
        None => cmd_tui(&cli.endpoint),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        if e.is_network() {
            eprintln!("  Check your network connection and try again.");
        }
        std::process::exit(1);
    }
}

/// Route tracing output to a file; stdout belongs to the TUI.
fn init_logging() {
    let log_dir = dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("hnsearch");
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(log_dir.join("hnsearch.log")) else {
        return;
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

/// Interactive TUI entry
fn cmd_tui(endpoint: &str) -> hnsearch::Result<()> {
    let client = Arc::new(SearchClient::new(ClientConfig {
        endpoint: endpoint.to_string(),
        ..Default::default()
    })?);
    let prefs = Box::new(FilePrefs::default_location());

    hnsearch::tui::run(client, prefs)
}

/// One-shot search command
fn cmd_search(endpoint: &str, query: &str, max: usize) -> hnsearch::Result<()> {
    println!(
        "{} Searching Hacker News for '{}'",
        style("\u{2192}").cyan().bold(),
        style(query).yellow()
    );

    let start = Instant::now();
    let client = SearchClient::new(ClientConfig {
        endpoint: endpoint.to_string(),
        ..Default::default()
    })?;
    let stories = client.search(query)?;
    let shown = stories.len().min(max);

    println!();
    println!(
        "Found {} stories in {}:",
        style(stories.len()).green(),
        style(HumanDuration(start.elapsed())).cyan()
    );
    println!();

    for (i, story) in stories.iter().take(max).enumerate() {
        println!(
            "  {} {} {}",
            style(format!("{:3}.", i + 1)).dim(),
            style(format!("{:>5}", story.points)).yellow(),
            style(&story.title).cyan()
        );
        let link = if story.url.is_empty() {
            "(no link)".to_string()
        } else {
            story.url.clone()
        };
        println!(
            "        by {} | {} comments | {}",
            story.author,
            format_count(story.num_comments),
            style(link).dim()
        );
    }

    if shown < stories.len() {
        println!();
        println!(
            "  ... and {} more (raise --max to see them)",
            stories.len() - shown
        );
    }

    Ok(())
}
