use scraper::Html;
use shelfscan_core::{ProductRecord, SiteId};

use super::{extract_common, PageSelectors};
use crate::extract::SiteExtractor;
use crate::select::labelled_rows;

// Magento storefront; the generic `h1` and `.price` fallbacks cover theme
// changes that drop the product-specific classes.
const SELECTORS: PageSelectors = PageSelectors {
    name: &[
        "h1.product-title",
        "h1.product-name",
        r#"h1[itemprop="name"]"#,
        ".product-title",
        "h1",
    ],
    price: &[
        ".product-price",
        r#"[itemprop="price"]"#,
        ".price",
        "span.price",
    ],
    description: &[
        ".product-description",
        r#"[itemprop="description"]"#,
        ".description",
        ".product-info",
    ],
    images: &[
        ".product-image img",
        r#"[itemprop="image"]"#,
        ".product-img img",
        "img.product",
        "img.product-image-photo",
    ],
    image_attrs: &["src", "data-src"],
    vendor: &[r#"[itemprop="brand"]"#, ".product-brand"],
    availability: &[".stock-status", ".stock"],
    reviews: &[".reviews-actions .action.view"],
};

pub struct GunMagWarehouse;

impl SiteExtractor for GunMagWarehouse {
    fn site(&self) -> SiteId {
        SiteId::GunMagWarehouse
    }

    fn extract(&self, html: &str, url: &str) -> ProductRecord {
        let doc = Html::parse_document(html);
        let mut record = extract_common(&doc, &SELECTORS, SiteId::GunMagWarehouse, url);
        record.attributes = labelled_rows(&doc, "#product-attribute-specs-table tr", "th", "td");
        record
    }
}
