//! Product page scraping: field cleaners, domain detection, per-site
//! extractors, page fetchers and the batch orchestrator.

pub mod clean;
pub mod domain;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod orchestrator;
mod select;
pub mod sites;

pub use domain::{detect, host_of};
pub use error::ScraperError;
pub use extract::{ExtractorRegistry, ScrapeContext, SiteExtractor};
#[cfg(feature = "browser")]
pub use fetch::BrowserFetcher;
pub use fetch::{AnyFetcher, HttpFetcher, PageFetcher};
pub use orchestrator::{BatchReport, Orchestrator, RecordSink};
