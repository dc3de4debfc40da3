mod inspect;
mod scrape;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use shelfscan_core::SiteId;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shelfscan-cli")]
#[command(about = "Scrape product listings into a Google Sheet")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a set of site → URL targets and write the rows to the sheet
    Run {
        /// YAML targets file (defaults to SHELFSCAN_TARGETS_PATH)
        #[arg(long, conflicts_with = "urls")]
        targets: Option<PathBuf>,

        /// Inline target as `site=url`; repeatable
        #[arg(long = "url", value_name = "SITE=URL", value_parser = parse_site_url)]
        urls: Vec<(String, String)>,

        /// Print the rows as TSV instead of writing to the sheet
        #[arg(long)]
        dry_run: bool,
    },
    /// Read URLs from a sheet column, scrape them and write results back on
    /// the same rows
    SyncSheet {
        /// Column holding the product URLs
        #[arg(long, default_value = "H", value_parser = parse_column)]
        column: String,

        /// First row to read
        #[arg(long, default_value_t = 3)]
        start_row: u32,

        /// Print the rows as TSV instead of writing them back
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the site id a URL maps to
    Detect { url: String },
    /// Run one site extractor on a saved HTML page and print the record
    Extract {
        /// Site whose extractor to use
        #[arg(long)]
        site: SiteId,

        /// Saved HTML page
        #[arg(long)]
        file: PathBuf,

        /// Source URL recorded on the output
        #[arg(long)]
        url: Option<String>,
    },
    /// Write the header row of the configured schema
    FormatSheet,
}

fn parse_site_url(raw: &str) -> Result<(String, String), String> {
    let (site, url) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SITE=URL, got '{raw}'"))?;
    let (site, url) = (site.trim(), url.trim());
    if site.is_empty() || url.is_empty() {
        return Err(format!("expected SITE=URL, got '{raw}'"));
    }
    Ok((site.to_string(), url.to_string()))
}

fn parse_column(raw: &str) -> Result<String, String> {
    let column = raw.trim().to_ascii_uppercase();
    if column.is_empty() || !column.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(format!("'{raw}' is not a column letter"));
    }
    Ok(column)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = shelfscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Run {
            targets,
            urls,
            dry_run,
        } => {
            let targets = scrape::resolve_targets(&config, targets.as_deref(), urls)?;
            scrape::run_targets(&config, &targets, dry_run).await?;
        }
        Commands::SyncSheet {
            column,
            start_row,
            dry_run,
        } => scrape::sync_sheet(&config, &column, start_row, dry_run).await?,
        Commands::Detect { url } => println!("{}", shelfscan_scraper::detect(&url)),
        Commands::Extract { site, file, url } => {
            inspect::extract_file(&config, site, &file, url.as_deref())?;
        }
        Commands::FormatSheet => scrape::format_sheet(&config).await?,
    }

    Ok(())
}
