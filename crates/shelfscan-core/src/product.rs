use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::site::SiteId;

/// Sentinel written into scalar fields the extractor could not find.
pub const NOT_FOUND: &str = "N/A";

/// Specification label → value pairs scraped from a product page.
///
/// Enumeration order is the sorted key order, which makes attribute lookup
/// deterministic for a given page.
pub type AttributeMap = BTreeMap<String, String>;

/// How a [`ProductRecord`] came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeStatus {
    /// Page fetched and run through its site extractor.
    Scraped,
    /// Fetch failed; the record is an error placeholder.
    Failed,
    /// No extractor is registered for the requested site.
    Unsupported,
}

impl ScrapeStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScrapeStatus::Scraped => "scraped",
            ScrapeStatus::Failed => "failed",
            ScrapeStatus::Unsupported => "unsupported",
        }
    }
}

/// One scraped product listing.
///
/// Every field always carries a value: fields the page did not yield hold
/// [`NOT_FOUND`], an empty string, or an empty collection. Consumers compare
/// against the sentinel and never branch on presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    /// Price text as shown on the page, e.g. `"$1,234.56"`.
    pub price_raw: String,
    /// Numeric price derived from `price_raw`, e.g. `"1234.56"`. Empty when
    /// the page had no price or the text held no number.
    pub price: String,
    pub description: String,
    /// Absolute image URLs in page order; the first is the primary image.
    pub images: Vec<String>,
    pub attributes: AttributeMap,
    pub vendor: String,
    pub availability: String,
    pub reviews: String,
    /// Source page URL; the natural key of the record.
    pub url: String,
    pub site: SiteId,
    pub status: ScrapeStatus,
    pub fetched_at: DateTime<Utc>,
}

impl ProductRecord {
    /// A record with every field at its sentinel, ready for an extractor to
    /// fill in whatever the page provides.
    #[must_use]
    pub fn empty(site: SiteId, url: &str) -> Self {
        Self {
            name: NOT_FOUND.to_string(),
            price_raw: NOT_FOUND.to_string(),
            price: String::new(),
            description: NOT_FOUND.to_string(),
            images: Vec::new(),
            attributes: AttributeMap::new(),
            vendor: NOT_FOUND.to_string(),
            availability: NOT_FOUND.to_string(),
            reviews: NOT_FOUND.to_string(),
            url: url.to_string(),
            site,
            status: ScrapeStatus::Scraped,
            fetched_at: Utc::now(),
        }
    }

    /// Placeholder emitted when fetching or extracting `url` failed.
    #[must_use]
    pub fn failed(site: SiteId, url: &str, message: impl Into<String>) -> Self {
        Self {
            name: "Error".to_string(),
            price_raw: String::new(),
            description: message.into(),
            status: ScrapeStatus::Failed,
            ..Self::empty(site, url)
        }
    }

    /// Placeholder emitted when `requested` names a site with no extractor.
    #[must_use]
    pub fn unsupported(requested: &str, url: &str) -> Self {
        Self {
            name: "Unsupported site".to_string(),
            price_raw: String::new(),
            description: format!("site '{requested}' is not supported yet"),
            status: ScrapeStatus::Unsupported,
            ..Self::empty(SiteId::Unknown, url)
        }
    }

    /// The first image, or `None` for a listing without images.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.status != ScrapeStatus::Scraped
    }
}
