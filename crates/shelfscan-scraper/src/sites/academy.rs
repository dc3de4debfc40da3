use scraper::Html;
use shelfscan_core::{ProductRecord, SiteId};

use super::{extract_common, PageSelectors};
use crate::extract::SiteExtractor;
use crate::select::delimited_rows;

const SELECTORS: PageSelectors = PageSelectors {
    name: &["h1.product-name", r#"[data-testid="product-name"]"#],
    price: &[".price-value", r#"[data-testid="price"]"#],
    description: &[
        ".product-description",
        r#"[data-testid="product-description"]"#,
    ],
    images: &[".product-image img", r#"[data-testid="product-image"]"#],
    image_attrs: &["src", "data-src"],
    vendor: &[r#"[data-testid="brand-name"]"#],
    availability: &[".stock-message"],
    reviews: &[r#"[data-testid="review-count"]"#, ".bv_numReviews_text"],
};

pub struct Academy;

impl SiteExtractor for Academy {
    fn site(&self) -> SiteId {
        SiteId::Academy
    }

    fn extract(&self, html: &str, url: &str) -> ProductRecord {
        let doc = Html::parse_document(html);
        let mut record = extract_common(&doc, &SELECTORS, SiteId::Academy, url);
        record.attributes = delimited_rows(&doc, ".product-specifications li", ':');
        record
    }
}

#[cfg(test)]
mod tests {
    use shelfscan_core::NOT_FOUND;

    use super::*;

    #[test]
    fn extracts_test_id_fallbacks() {
        let html = r#"
            <div data-testid="product-name">Magellan Outdoors  Camp Chair</div>
            <span data-testid="price">$24.99</span>
            <div data-testid="product-description"><p>Folding chair.</p><p>Cup holder.</p></div>
            <img data-testid="product-image" src="//academy.scene7.com/is/image/academy/1.jpg">
            <span data-testid="brand-name">Magellan Outdoors</span>
            <ul class="product-specifications">
              <li>Weight Capacity: 250 lb</li>
              <li>Color:  Navy </li>
              <li>Imported</li>
            </ul>"#;
        let record = Academy.extract(html, "https://www.academy.com/p/chair");
        assert_eq!(record.name, "Magellan Outdoors Camp Chair");
        assert_eq!(record.price, "24.99");
        assert_eq!(record.description, "Folding chair. Cup holder.");
        assert_eq!(
            record.images,
            vec!["https://academy.scene7.com/is/image/academy/1.jpg"]
        );
        assert_eq!(record.vendor, "Magellan Outdoors");
        assert_eq!(record.attributes.len(), 2);
        assert_eq!(record.attributes["Weight Capacity"], "250 lb");
        assert_eq!(record.attributes["Color"], "Navy");
        assert_eq!(record.availability, NOT_FOUND);
    }

    #[test]
    fn class_selectors_take_priority() {
        let html = r#"
            <h1 class="product-name">Primary</h1>
            <div data-testid="product-name">Secondary</div>
            <span class="price-value">$10.00</span>
            <span data-testid="price">$99.00</span>"#;
        let record = Academy.extract(html, "u");
        assert_eq!(record.name, "Primary");
        assert_eq!(record.price, "10.00");
    }
}
