//! Batch driver: one record per requested URL, in request order.
//!
//! Item-level problems never abort a batch. An unsupported site or a failed
//! fetch becomes a placeholder record and the loop moves on; only the sink
//! can fail the batch as a whole.

use std::future::Future;

use shelfscan_core::{ProductRecord, ScrapeStatus, SiteId, SiteUrls};
use tracing::Instrument;

use crate::domain::{detect, host_of};
use crate::extract::{ExtractorRegistry, ScrapeContext};
use crate::fetch::PageFetcher;

/// Destination for a finished batch.
pub trait RecordSink: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persists `records` in order and returns the number of rows written.
    fn write_records(
        &self,
        records: &[ProductRecord],
    ) -> impl Future<Output = Result<usize, Self::Error>> + Send;
}

/// Counts for one batch, logged at completion and returned to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub records: usize,
    pub scraped: usize,
    pub failed: usize,
    pub unsupported: usize,
    pub rows_written: usize,
}

impl BatchReport {
    #[must_use]
    pub fn tally(records: &[ProductRecord]) -> Self {
        let mut report = Self {
            records: records.len(),
            ..Self::default()
        };
        for record in records {
            match record.status {
                ScrapeStatus::Scraped => report.scraped += 1,
                ScrapeStatus::Failed => report.failed += 1,
                ScrapeStatus::Unsupported => report.unsupported += 1,
            }
        }
        report
    }
}

pub struct Orchestrator<F> {
    fetcher: F,
    registry: ExtractorRegistry,
    ctx: ScrapeContext,
}

impl<F: PageFetcher> Orchestrator<F> {
    #[must_use]
    pub fn new(fetcher: F, registry: ExtractorRegistry, ctx: ScrapeContext) -> Self {
        Self {
            fetcher,
            registry,
            ctx,
        }
    }

    #[must_use]
    pub fn context(&self) -> &ScrapeContext {
        &self.ctx
    }

    /// Scrapes every `(site, url)` pair in map order.
    ///
    /// Site names are matched case-insensitively against [`SiteId`]; a name
    /// that does not parse, or has no registered extractor, yields an
    /// unsupported placeholder.
    pub async fn run(&self, targets: &SiteUrls) -> Vec<ProductRecord> {
        let span = tracing::info_span!(
            "scrape_batch",
            run_id = %self.ctx.run_id,
            targets = targets.len()
        );

        async {
            let mut records = Vec::with_capacity(targets.len());
            for (requested, url) in targets {
                let site = requested.parse::<SiteId>().unwrap_or(SiteId::Unknown);
                records.push(self.scrape_one(requested, site, url).await);
            }
            log_report(&BatchReport::tally(&records));
            records
        }
        .instrument(span)
        .await
    }

    /// Scrapes bare URLs, picking each extractor from the URL's host.
    pub async fn run_detected(&self, urls: &[String]) -> Vec<ProductRecord> {
        let span = tracing::info_span!(
            "scrape_batch",
            run_id = %self.ctx.run_id,
            targets = urls.len()
        );

        async {
            let mut records = Vec::with_capacity(urls.len());
            for url in urls {
                let site = detect(url);
                let requested = if site.is_known() {
                    site.as_str().to_string()
                } else {
                    host_of(url).unwrap_or_else(|| url.clone())
                };
                records.push(self.scrape_one(&requested, site, url).await);
            }
            log_report(&BatchReport::tally(&records));
            records
        }
        .instrument(span)
        .await
    }

    /// [`run`](Self::run), then hands the whole batch to `sink` in one call.
    /// An empty batch never reaches the sink.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error; per-item failures are already folded
    /// into placeholder records.
    pub async fn run_and_store<S: RecordSink>(
        &self,
        targets: &SiteUrls,
        sink: &S,
    ) -> Result<BatchReport, S::Error> {
        let records = self.run(targets).await;
        store(&records, sink).await
    }

    async fn scrape_one(&self, requested: &str, site: SiteId, url: &str) -> ProductRecord {
        let Some(extractor) = self.registry.get(site) else {
            tracing::warn!(site = requested, url, "site not supported; emitting placeholder");
            return ProductRecord::unsupported(requested, url);
        };

        match self
            .fetcher
            .fetch_rendered_html(url, extractor.settle_delay())
            .await
        {
            Ok(html) => {
                let record = self
                    .registry
                    .extract(site, &html, url, &self.ctx)
                    .unwrap_or_else(|| ProductRecord::unsupported(requested, url));
                tracing::info!(%site, url, name = %record.name, "scraped product");
                record
            }
            Err(e) => {
                tracing::error!(%site, url, error = %e, "page fetch failed");
                ProductRecord::failed(site, url, e.to_string())
            }
        }
    }
}

/// Writes an already-scraped batch to `sink`, skipping it when empty.
///
/// # Errors
///
/// Propagates the sink's error.
pub async fn store<S: RecordSink>(
    records: &[ProductRecord],
    sink: &S,
) -> Result<BatchReport, S::Error> {
    let mut report = BatchReport::tally(records);
    if records.is_empty() {
        tracing::info!("no records produced; nothing to store");
        return Ok(report);
    }

    report.rows_written = sink.write_records(records).await?;
    tracing::info!(rows_written = report.rows_written, "batch stored");
    Ok(report)
}

fn log_report(report: &BatchReport) {
    tracing::info!(
        records = report.records,
        scraped = report.scraped,
        failed = report.failed,
        unsupported = report.unsupported,
        "scrape batch complete"
    );
}
