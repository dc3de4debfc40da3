use std::path::Path;

use anyhow::Context;
use shelfscan_core::{AppConfig, SiteId};
use shelfscan_scraper::{ExtractorRegistry, ScrapeContext};

/// Runs the `site` extractor over a saved page and prints the record as
/// pretty JSON.
pub(crate) fn extract_file(
    config: &AppConfig,
    site: SiteId,
    file: &Path,
    url: Option<&str>,
) -> anyhow::Result<()> {
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let source = url.map_or_else(|| file.display().to_string(), str::to_string);

    let registry = ExtractorRegistry::with_defaults();
    let ctx = ScrapeContext::new(config.description_max_chars, "extract");
    let record = registry
        .extract(site, &html, &source, &ctx)
        .ok_or_else(|| anyhow::anyhow!("no extractor registered for site '{site}'"))?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
