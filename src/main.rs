//! Gleaner main entry point
//!
//! Command-line interface for the review harvester. All configuration is
//! validated up front; nothing touches the network until it passes.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use gleaner::config::{self, HarvestConfig, Mode};
use gleaner::{directory, harvest, output, session};
use gleaner::storage::CompanyStore;
use gleaner::Orchestrator;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Gleaner: an incremental employer-review harvester
///
/// Signs in to the source, walks a paginated review listing for the target
/// organization, and writes the normalized records to CSV. A secondary
/// mode searches the source's company directory instead.
#[derive(Parser, Debug)]
#[command(name = "gleaner")]
#[command(version)]
#[command(about = "Harvest employer reviews into a tabular CSV export", long_about = None)]
struct Cli {
    /// URL of the organization's landing page, or of an already-sorted
    /// review listing together with --start-from-url
    #[arg(short, long)]
    url: Url,

    /// Output CSV file
    #[arg(short = 'f', long = "file", default_value = "reviews.csv")]
    file: PathBuf,

    /// Maximum number of reviews (or companies per search) to harvest
    #[arg(short, long, default_value_t = 25)]
    limit: usize,

    /// Latest review date to harvest; requires --start-from-url and a
    /// listing sorted ASCENDING by date
    #[arg(long, value_name = "YYYY-MM-DD")]
    max_date: Option<NaiveDate>,

    /// Earliest review date to harvest; requires --start-from-url and a
    /// listing sorted DESCENDING by date
    #[arg(long, value_name = "YYYY-MM-DD")]
    min_date: Option<NaiveDate>,

    /// Treat --url as the listing itself and start harvesting there
    #[arg(long)]
    start_from_url: bool,

    /// Whether to harvest reviews or search for companies
    #[arg(long, value_enum, default_value_t = CliMode::Reviews)]
    mode: CliMode,

    /// Company names to search in companies mode
    #[arg(long, num_args = 1.., value_name = "NAME")]
    search_names: Vec<String>,

    /// SQLite store path; enables deduplicated persistence across runs
    /// (companies mode)
    #[arg(long, value_name = "DB")]
    store: Option<PathBuf>,

    /// Seconds to pause between successive company searches
    #[arg(long, default_value_t = 30)]
    search_delay: u64,

    /// Email address used to sign in to the source
    #[arg(long)]
    username: Option<String>,

    /// Password used to sign in to the source
    #[arg(short, long)]
    password: Option<String>,

    /// JSON credentials file with "username" and "password" keys
    #[arg(short, long, value_name = "FILE")]
    credentials: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliMode {
    Reviews,
    Companies,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    // Everything that can be rejected is rejected here, before any
    // navigation occurs.
    let config = build_config(cli)?;

    tracing::info!(
        "Harvesting up to {} {}",
        config.limit,
        match config.mode {
            Mode::Reviews => "reviews",
            Mode::Companies => "companies per search",
        }
    );

    match config.mode {
        Mode::Reviews => run_reviews(config).await?,
        Mode::Companies => run_directory(config).await?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gleaner=info,warn"),
            1 => EnvFilter::new("gleaner=debug,info"),
            2 => EnvFilter::new("gleaner=trace,debug"),
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

/// Builds and validates the run configuration from the command line
fn build_config(cli: Cli) -> Result<HarvestConfig, gleaner::ConfigError> {
    let credentials =
        config::resolve_credentials(cli.username, cli.password, cli.credentials.as_deref())?;
    let date_bound =
        config::resolve_date_bound(cli.min_date, cli.max_date, cli.start_from_url, &cli.url)?;

    let config = HarvestConfig {
        start_url: cli.url,
        output_path: cli.file,
        limit: cli.limit,
        date_bound,
        start_from_listing: cli.start_from_url,
        mode: match cli.mode {
            CliMode::Reviews => Mode::Reviews,
            CliMode::Companies => Mode::Companies,
        },
        search_names: cli.search_names,
        store_path: cli.store,
        search_delay: Duration::from_secs(cli.search_delay),
        credentials,
    };
    config::validate(&config)?;
    Ok(config)
}

/// Handles review mode: sign in, walk the listing, write the CSV
async fn run_reviews(config: HarvestConfig) -> gleaner::Result<()> {
    let client = session::build_client()?;
    session::sign_in(&client, &config.start_url, &config.credentials).await?;

    let listing_url = if config.start_from_listing {
        config.start_url.clone()
    } else {
        harvest::navigate_to_listing(&client, &config.start_url).await?
    };

    let mut orchestrator =
        Orchestrator::new(client, listing_url, config.limit, config.date_bound);
    let records = orchestrator.run().await?;

    tracing::info!(
        "Writing {} reviews to {}",
        records.len(),
        config.output_path.display()
    );
    output::write_reviews(&config.output_path, &records)?;
    Ok(())
}

/// Handles companies mode: sweep the directory, optionally persisting to
/// the dedup store (the fleet-crawl variant)
async fn run_directory(config: HarvestConfig) -> gleaner::Result<()> {
    let client = session::build_client()?;
    session::sign_in(&client, &config.start_url, &config.credentials).await?;

    let mut store = match &config.store_path {
        Some(path) => Some(CompanyStore::open(path)?),
        None => None,
    };

    let listings = directory::sweep(
        &client,
        &config.start_url,
        &config.search_names,
        config.limit,
        store.as_mut(),
        &config.output_path,
        config.search_delay,
    )
    .await?;

    tracing::info!(
        "Recorded {} company listings to {}",
        listings.len(),
        config.output_path.display()
    );
    Ok(())
}
