//! Built-in storefront extractors.
//!
//! Each site is a unit struct implementing [`crate::SiteExtractor`]. The
//! fields every storefront shares are driven by a [`PageSelectors`] table;
//! attribute tables and image upgrades are handled per site.

mod academy;
mod amazon;
mod ebay;
mod gunmagwarehouse;
mod mercadolibre;

pub use academy::Academy;
pub use amazon::Amazon;
pub use ebay::Ebay;
pub use gunmagwarehouse::GunMagWarehouse;
pub use mercadolibre::MercadoLibre;

use scraper::Html;
use shelfscan_core::{ProductRecord, SiteId, NOT_FOUND};

use crate::clean::clean_price;
use crate::select::{all_attrs, first_text};

/// Selector candidates for the fields every storefront exposes, each list in
/// priority order.
pub(crate) struct PageSelectors {
    pub name: &'static [&'static str],
    pub price: &'static [&'static str],
    pub description: &'static [&'static str],
    pub images: &'static [&'static str],
    pub image_attrs: &'static [&'static str],
    pub vendor: &'static [&'static str],
    pub availability: &'static [&'static str],
    pub reviews: &'static [&'static str],
}

/// Fills the shared fields of a record from `doc`. Attributes are left
/// empty for the caller.
pub(crate) fn extract_common(
    doc: &Html,
    selectors: &PageSelectors,
    site: SiteId,
    url: &str,
) -> ProductRecord {
    let mut record = ProductRecord::empty(site, url);
    let or_missing = |value: Option<String>| value.unwrap_or_else(|| NOT_FOUND.to_string());

    record.name = or_missing(first_text(doc, selectors.name));
    if let Some(price_raw) = first_text(doc, selectors.price) {
        set_price(&mut record, price_raw);
    }
    record.description = or_missing(first_text(doc, selectors.description));
    record.images = all_attrs(doc, selectors.images, selectors.image_attrs);
    record.vendor = or_missing(first_text(doc, selectors.vendor));
    record.availability = or_missing(first_text(doc, selectors.availability));
    record.reviews = or_missing(first_text(doc, selectors.reviews));
    record
}

/// Stores the captured price text and its cleaned numeric form.
pub(crate) fn set_price(record: &mut ProductRecord, price_raw: String) {
    record.price = clean_price(&price_raw);
    record.price_raw = price_raw;
}

/// Rewrites every URL with `upgrade` and drops duplicates the rewrite
/// produced, keeping first occurrences.
pub(crate) fn upgrade_images(images: Vec<String>, upgrade: impl Fn(&str) -> String) -> Vec<String> {
    let mut upgraded: Vec<String> = Vec::with_capacity(images.len());
    for url in images {
        let url = upgrade(&url);
        if !upgraded.contains(&url) {
            upgraded.push(url);
        }
    }
    upgraded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrade_collapses_variants_of_same_image() {
        let images = vec![
            "https://cdn/a-small.jpg".to_string(),
            "https://cdn/a-large.jpg".to_string(),
            "https://cdn/b-small.jpg".to_string(),
        ];
        let upgraded = upgrade_images(images, |u| u.replace("-small", "-large"));
        assert_eq!(upgraded, vec!["https://cdn/a-large.jpg", "https://cdn/b-large.jpg"]);
    }

    #[test]
    fn set_price_keeps_raw_text() {
        let mut record = ProductRecord::empty(SiteId::Ebay, "u");
        set_price(&mut record, "US $1,299.00".to_string());
        assert_eq!(record.price_raw, "US $1,299.00");
        assert_eq!(record.price, "1299.00");
    }
}
