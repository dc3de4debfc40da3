//! Batch command handlers: `run`, `sync-sheet` and `format-sheet`.
//!
//! Sheet clients are built before any page is fetched so a missing sheet
//! id or token fails the command up front instead of after a full scrape.

use std::path::Path;

use anyhow::Context;
use shelfscan_core::{load_targets, validate_targets, AppConfig, ProductRecord, SiteUrls};
use shelfscan_scraper::{AnyFetcher, ExtractorRegistry, Orchestrator, ScrapeContext};
use shelfscan_sheets::{project, GoogleSheetsClient, RowSchema, RowStore, SheetWriter};

/// Targets from `--url` pairs when given, otherwise from the YAML file at
/// `targets_path` or the configured default path.
pub(crate) fn resolve_targets(
    config: &AppConfig,
    targets_path: Option<&Path>,
    inline: Vec<(String, String)>,
) -> anyhow::Result<SiteUrls> {
    if !inline.is_empty() {
        let targets: SiteUrls = inline.into_iter().collect();
        validate_targets(&targets)?;
        return Ok(targets);
    }

    let path = targets_path.unwrap_or(config.targets_path.as_path());
    let file = load_targets(path)
        .with_context(|| format!("failed to load targets from {}", path.display()))?;
    Ok(file.targets)
}

fn build_orchestrator(config: &AppConfig) -> anyhow::Result<Orchestrator<AnyFetcher>> {
    let fetcher = AnyFetcher::from_config(config).context("failed to build page fetcher")?;
    let run_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(run_id, fetcher = ?config.fetcher, "starting scrape run");
    Ok(Orchestrator::new(
        fetcher,
        ExtractorRegistry::with_defaults(),
        ScrapeContext::new(config.description_max_chars, run_id),
    ))
}

fn sheet_writer(config: &AppConfig) -> anyhow::Result<SheetWriter<GoogleSheetsClient>> {
    let client =
        GoogleSheetsClient::from_config(config).context("failed to build Google Sheets client")?;
    Ok(SheetWriter::from_config(client, config))
}

pub(crate) fn tsv_cell(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

fn print_tsv<'a>(schema: RowSchema, rows: impl IntoIterator<Item = &'a ProductRecord>) {
    println!("{}", schema.headers().join("\t"));
    for record in rows {
        let cells: Vec<String> = project(record, schema).iter().map(|c| tsv_cell(c)).collect();
        println!("{}", cells.join("\t"));
    }
}

/// Scrapes `targets` and appends the rows to the configured sheet, or
/// prints them when `dry_run` is set.
///
/// # Errors
///
/// Returns an error if the fetcher or sheet client cannot be built, or the
/// sheet write fails. Per-target failures become placeholder rows.
pub(crate) async fn run_targets(
    config: &AppConfig,
    targets: &SiteUrls,
    dry_run: bool,
) -> anyhow::Result<()> {
    if dry_run {
        let orchestrator = build_orchestrator(config)?;
        let records = orchestrator.run(targets).await;
        print_tsv(RowSchema::from(config.row_schema), &records);
        return Ok(());
    }

    let writer = sheet_writer(config)?;
    let orchestrator = build_orchestrator(config)?;
    let report = orchestrator
        .run_and_store(targets, &writer)
        .await
        .context("failed to write results to sheet")?;

    println!(
        "scraped {} of {} targets ({} failed, {} unsupported); wrote {} rows to '{}'",
        report.scraped,
        report.records,
        report.failed,
        report.unsupported,
        report.rows_written,
        writer.sheet_name()
    );
    Ok(())
}

/// Reads product URLs from `column`, scrapes each one with the extractor
/// its host maps to, and writes the basic row back onto the URL's row.
///
/// # Errors
///
/// Returns an error if the sheet cannot be read or written.
pub(crate) async fn sync_sheet(
    config: &AppConfig,
    column: &str,
    start_row: u32,
    dry_run: bool,
) -> anyhow::Result<()> {
    let writer = sheet_writer(config)?.with_schema(RowSchema::Basic);
    let cells = writer
        .store()
        .read_column(writer.sheet_name(), column, start_row)
        .await
        .with_context(|| format!("failed to read column {column} of '{}'", writer.sheet_name()))?;

    if cells.is_empty() {
        println!("no URLs found in column {column} from row {start_row}");
        return Ok(());
    }

    let orchestrator = build_orchestrator(config)?;
    let urls: Vec<String> = cells.iter().map(|(_, url)| url.clone()).collect();
    let records = orchestrator.run_detected(&urls).await;
    let rows: Vec<(u32, ProductRecord)> = cells.iter().map(|(row, _)| *row).zip(records).collect();

    if dry_run {
        print_tsv(RowSchema::Basic, rows.iter().map(|(_, record)| record));
        return Ok(());
    }

    let written = writer
        .write_back(&rows)
        .await
        .context("failed to write results back to sheet")?;
    println!("updated {written} rows in '{}'", writer.sheet_name());
    Ok(())
}

/// Writes the configured schema's header row.
///
/// # Errors
///
/// Returns an error if the sheet client cannot be built or the write fails.
pub(crate) async fn format_sheet(config: &AppConfig) -> anyhow::Result<()> {
    let writer = sheet_writer(config)?;
    writer
        .write_header()
        .await
        .context("failed to write header row")?;
    println!(
        "wrote {} headers to '{}' row {}",
        writer.schema().width(),
        writer.sheet_name(),
        config.header_row
    );
    Ok(())
}
