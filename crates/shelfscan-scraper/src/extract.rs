//! Site extractor contract and the registry keyed by [`SiteId`].

use std::collections::BTreeMap;
use std::time::Duration;

use shelfscan_core::{ProductRecord, SiteId, NOT_FOUND};

use crate::clean::truncate_chars;
use crate::sites::{Academy, Amazon, Ebay, GunMagWarehouse, MercadoLibre};

/// Wait hint for pages that render their product block client-side.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Description cap applied when no configuration overrides it.
pub const DEFAULT_DESCRIPTION_MAX_CHARS: usize = 500;

/// Turns one product page into a [`ProductRecord`].
///
/// Extraction is infallible: a selector miss degrades that single field to
/// its sentinel and never fails the page.
pub trait SiteExtractor: Send + Sync {
    fn site(&self) -> SiteId;

    fn extract(&self, html: &str, url: &str) -> ProductRecord;

    /// How long a rendering fetcher should let the page settle before the
    /// DOM is captured.
    fn settle_delay(&self) -> Duration {
        DEFAULT_SETTLE_DELAY
    }
}

/// Per-run settings threaded through extraction.
#[derive(Debug, Clone)]
pub struct ScrapeContext {
    pub description_max_chars: usize,
    pub run_id: String,
}

impl ScrapeContext {
    #[must_use]
    pub fn new(description_max_chars: usize, run_id: impl Into<String>) -> Self {
        Self {
            description_max_chars,
            run_id: run_id.into(),
        }
    }
}

impl Default for ScrapeContext {
    fn default() -> Self {
        Self::new(DEFAULT_DESCRIPTION_MAX_CHARS, "local")
    }
}

#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: BTreeMap<SiteId, Box<dyn SiteExtractor>>,
}

impl ExtractorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in storefront.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(GunMagWarehouse));
        registry.register(Box::new(Ebay));
        registry.register(Box::new(Amazon));
        registry.register(Box::new(Academy));
        registry.register(Box::new(MercadoLibre));
        registry
    }

    /// Adds or replaces the extractor for `extractor.site()`.
    /// [`SiteId::Unknown`] is never registered.
    pub fn register(&mut self, extractor: Box<dyn SiteExtractor>) {
        let site = extractor.site();
        if site == SiteId::Unknown {
            tracing::warn!("refusing to register an extractor for the unknown site");
            return;
        }
        self.extractors.insert(site, extractor);
    }

    #[must_use]
    pub fn get(&self, site: SiteId) -> Option<&dyn SiteExtractor> {
        self.extractors.get(&site).map(AsRef::as_ref)
    }

    /// Sites with a registered extractor, in [`SiteId`] order.
    pub fn sites(&self) -> impl Iterator<Item = SiteId> + '_ {
        self.extractors.keys().copied()
    }

    /// Runs the extractor registered for `site` and caps the description.
    ///
    /// Returns `None` when no extractor is registered for `site`.
    #[must_use]
    pub fn extract(
        &self,
        site: SiteId,
        html: &str,
        url: &str,
        ctx: &ScrapeContext,
    ) -> Option<ProductRecord> {
        let extractor = self.get(site)?;
        let mut record = extractor.extract(html, url);
        if record.description != NOT_FOUND {
            record.description = truncate_chars(&record.description, ctx.description_max_chars);
        }
        Some(record)
    }
}
