use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use shelfscan_core::{ProductRecord, SiteId};

use super::{extract_common, upgrade_images, PageSelectors};
use crate::extract::SiteExtractor;
use crate::select::labelled_rows;

/// eBay serves every gallery image at several widths under `/s-l<N>.<ext>`.
static SIZE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/s-l\d+\.(jpe?g|png|webp)").expect("valid ebay image regex")
});

const SELECTORS: PageSelectors = PageSelectors {
    name: &["h1.x-item-title__mainTitle", "h1#itemTitle"],
    price: &[".x-price-primary span.ux-textspans", "#prcIsum"],
    description: &[".ux-layout-section__item--description", "#desc_wrapper"],
    images: &[".ux-image-carousel-item img"],
    image_attrs: &["data-zoom-src", "src", "data-src"],
    vendor: &[".x-sellercard-atf__info__about-seller"],
    availability: &[".x-quantity__availability"],
    reviews: &[".x-sellercard-atf__data-item"],
};

fn full_size(url: &str) -> String {
    SIZE_TOKEN_RE.replace(url, "/s-l1600.${1}").into_owned()
}

pub struct Ebay;

impl SiteExtractor for Ebay {
    fn site(&self) -> SiteId {
        SiteId::Ebay
    }

    fn extract(&self, html: &str, url: &str) -> ProductRecord {
        let doc = Html::parse_document(html);
        let mut record = extract_common(&doc, &SELECTORS, SiteId::Ebay, url);
        record.images = upgrade_images(record.images, full_size);
        record.attributes = labelled_rows(
            &doc,
            ".ux-labels-values",
            ".ux-labels-values__labels",
            ".ux-labels-values__values",
        );
        record
    }
}

#[cfg(test)]
mod tests {
    use shelfscan_core::NOT_FOUND;

    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <h1 class="x-item-title__mainTitle"><span class="ux-textspans">Glock 19 Gen5 Slide</span></h1>
          <div class="x-price-primary"><span class="ux-textspans">US $349.99</span></div>
          <div class="ux-image-carousel-item"><img src="https://i.ebayimg.com/images/g/abc/s-l500.jpg"></div>
          <div class="ux-image-carousel-item"><img data-zoom-src="https://i.ebayimg.com/images/g/abc/s-l1600.jpg" src="https://i.ebayimg.com/images/g/abc/s-l140.jpg"></div>
          <div class="ux-image-carousel-item"><img data-src="//i.ebayimg.com/images/g/def/s-l64.webp"></div>
          <div class="x-sellercard-atf__info__about-seller"><a><span>tactical_depot</span></a></div>
          <div class="x-sellercard-atf__data-item">99.8% positive feedback</div>
          <div class="x-quantity__availability"><span>3 available</span></div>
          <div class="ux-labels-values">
            <div class="ux-labels-values__labels"><span>Condition:</span></div>
            <div class="ux-labels-values__values"><span>New</span></div>
          </div>
          <div class="ux-labels-values">
            <div class="ux-labels-values__labels"><span>Brand:</span></div>
            <div class="ux-labels-values__values"><span>Glock</span></div>
          </div>
        </body></html>"#;

    #[test]
    fn extracts_listing_fields() {
        let record = Ebay.extract(PAGE, "https://www.ebay.com/itm/1234");
        assert_eq!(record.name, "Glock 19 Gen5 Slide");
        assert_eq!(record.price_raw, "US $349.99");
        assert_eq!(record.price, "349.99");
        assert_eq!(record.vendor, "tactical_depot");
        assert_eq!(record.reviews, "99.8% positive feedback");
        assert_eq!(record.availability, "3 available");
        assert_eq!(record.description, NOT_FOUND);
    }

    #[test]
    fn gallery_is_upgraded_to_largest_rendition() {
        let record = Ebay.extract(PAGE, "https://www.ebay.com/itm/1234");
        assert_eq!(
            record.images,
            vec![
                "https://i.ebayimg.com/images/g/abc/s-l1600.jpg",
                "https://i.ebayimg.com/images/g/def/s-l1600.webp",
            ]
        );
    }

    #[test]
    fn item_specifics_become_attributes() {
        let record = Ebay.extract(PAGE, "https://www.ebay.com/itm/1234");
        assert_eq!(record.attributes.len(), 2);
        assert_eq!(record.attributes["Condition"], "New");
        assert_eq!(record.attributes["Brand"], "Glock");
    }

    #[test]
    fn legacy_price_block_is_a_fallback() {
        let html = r#"<span id="prcIsum">US $12.00</span>"#;
        assert_eq!(Ebay.extract(html, "u").price, "12.00");
    }
}
