use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use scraper::Html;
use shelfscan_core::{ProductRecord, SiteId};

use super::{extract_common, upgrade_images, PageSelectors};
use crate::extract::SiteExtractor;
use crate::select::{delimited_rows, first_attr, labelled_rows, merge_missing};

/// Size/crop token in Amazon media URLs, e.g. `._AC_US40_.jpg`.
static THUMB_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\._[A-Za-z0-9,_-]+_\.(jpe?g|png|webp|gif)$").expect("valid amazon image regex")
});

const SELECTORS: PageSelectors = PageSelectors {
    name: &["#productTitle", "#title"],
    price: &[
        ".a-price span.a-offscreen",
        "#priceblock_ourprice",
        "#priceblock_dealprice",
        ".a-price-whole",
    ],
    description: &["#feature-bullets", "#productDescription"],
    images: &["#landingImage", "#altImages img"],
    image_attrs: &["data-old-hires", "src"],
    vendor: &["#bylineInfo", "#sellerProfileTriggerId"],
    availability: &["#availability"],
    reviews: &["#acrCustomerReviewText"],
};

/// Swaps any thumbnail token for the 1500px rendition.
fn full_size(url: &str) -> String {
    THUMB_TOKEN_RE
        .replace(url, "._AC_SL1500_.${1}")
        .into_owned()
}

/// The picture behind a media URL, ignoring its rendition token:
/// `71a._AC_SL1500_.jpg` and `71a.jpg` are the same image.
fn image_stem(url: &str) -> String {
    THUMB_TOKEN_RE.replace(url, ".${1}").into_owned()
}

pub struct Amazon;

impl SiteExtractor for Amazon {
    fn site(&self) -> SiteId {
        SiteId::Amazon
    }

    fn extract(&self, html: &str, url: &str) -> ProductRecord {
        let doc = Html::parse_document(html);
        let mut record = extract_common(&doc, &SELECTORS, SiteId::Amazon, url);

        if record.images.is_empty() {
            if let Some(dynamic) = first_attr(&doc, &["#imgTagWrapperId img"], &["src"]) {
                record.images.push(dynamic);
            }
        }
        record.images = upgrade_images(record.images, full_size);
        let mut seen = HashSet::new();
        record.images.retain(|image| seen.insert(image_stem(image)));

        let mut attributes = labelled_rows(&doc, "#productDetails_techSpec_section_1 tr", "th", "td");
        merge_missing(
            &mut attributes,
            labelled_rows(&doc, "#productOverview_feature_div tr", "td:first-child", "td:last-child"),
        );
        merge_missing(
            &mut attributes,
            delimited_rows(&doc, "#detailBullets_feature_div li", ':'),
        );
        record.attributes = attributes;

        record
    }

    fn settle_delay(&self) -> Duration {
        Duration::from_secs(3)
    }
}

#[cfg(test)]
mod tests {
    use shelfscan_core::NOT_FOUND;

    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <span id="productTitle">  Magpul PMAG   30 GEN M3  </span>
          <a id="bylineInfo">Visit the Magpul Store</a>
          <div class="a-price"><span class="a-offscreen">$1,234.56</span></div>
          <div id="feature-bullets"><ul><li> Impact resistant </li><li>Polymer body</li></ul></div>
          <div id="availability"><span> In Stock </span></div>
          <span id="acrCustomerReviewText">2,345 ratings</span>
          <img id="landingImage" data-old-hires="https://m.media-amazon.com/images/I/71a.jpg"
               src="https://m.media-amazon.com/images/I/71a._AC_SX300_.jpg">
          <div id="altImages">
            <img src="https://m.media-amazon.com/images/I/71a._AC_US40_.jpg">
            <img src="https://m.media-amazon.com/images/I/81b._AC_US40_.jpg">
          </div>
          <table id="productDetails_techSpec_section_1">
            <tr><th> Brand </th><td> Magpul </td></tr>
            <tr><th>Item model number</th><td>MAG557-BLK</td></tr>
          </table>
          <div id="detailBullets_feature_div"><ul>
            <li><span>Manufacturer : Magpul Industries</span></li>
            <li><span>Brand : Other</span></li>
          </ul></div>
        </body></html>"#;

    #[test]
    fn extracts_full_listing() {
        let record = Amazon.extract(PAGE, "https://www.amazon.com/dp/B0001");
        assert_eq!(record.site, SiteId::Amazon);
        assert_eq!(record.name, "Magpul PMAG 30 GEN M3");
        assert_eq!(record.price_raw, "$1,234.56");
        assert_eq!(record.price, "1234.56");
        assert_eq!(record.description, "Impact resistant Polymer body");
        assert_eq!(record.vendor, "Visit the Magpul Store");
        assert_eq!(record.availability, "In Stock");
        assert_eq!(record.reviews, "2,345 ratings");
        assert_eq!(record.url, "https://www.amazon.com/dp/B0001");
    }

    #[test]
    fn images_are_upgraded_and_deduplicated() {
        let record = Amazon.extract(PAGE, "https://www.amazon.com/dp/B0001");
        assert_eq!(
            record.images,
            vec![
                "https://m.media-amazon.com/images/I/71a.jpg",
                "https://m.media-amazon.com/images/I/81b._AC_SL1500_.jpg",
            ]
        );
    }

    #[test]
    fn alt_thumbnail_of_landing_image_is_dropped() {
        let html = r#"
            <img id="landingImage" data-old-hires="https://m.media-amazon.com/images/I/71a.jpg">
            <div id="altImages">
              <img src="https://m.media-amazon.com/images/I/71a._AC_US40_.jpg">
              <img src="https://m.media-amazon.com/images/I/71a._SX38_SY50_CR,0,0,38,50_.jpg">
            </div>"#;
        let record = Amazon.extract(html, "https://www.amazon.com/dp/B0003");
        assert_eq!(record.images, vec!["https://m.media-amazon.com/images/I/71a.jpg"]);
    }

    #[test]
    fn tech_spec_table_wins_over_detail_bullets() {
        let record = Amazon.extract(PAGE, "https://www.amazon.com/dp/B0001");
        assert_eq!(record.attributes["Brand"], "Magpul");
        assert_eq!(record.attributes["Item model number"], "MAG557-BLK");
        assert_eq!(record.attributes["Manufacturer"], "Magpul Industries");
    }

    #[test]
    fn title_only_page_leaves_price_at_sentinel() {
        let html = r#"<html><body><span id="productTitle">  Widget   Pro  </span></body></html>"#;
        let record = Amazon.extract(html, "https://www.amazon.com/dp/B0002");
        assert_eq!(record.name, "Widget Pro");
        assert_eq!(record.price_raw, NOT_FOUND);
        assert_eq!(record.price, "");
        assert_eq!(record.description, NOT_FOUND);
        assert!(record.images.is_empty());
        assert!(record.attributes.is_empty());
    }

    #[test]
    fn falls_back_to_deal_price() {
        let html = r#"<span id="priceblock_dealprice">$19.99</span>"#;
        let record = Amazon.extract(html, "u");
        assert_eq!(record.price, "19.99");
    }

    #[test]
    fn image_stem_strips_rendition_token() {
        assert_eq!(image_stem("https://x/I/71a._AC_SL1500_.jpg"), "https://x/I/71a.jpg");
        assert_eq!(image_stem("https://x/I/71a.jpg"), "https://x/I/71a.jpg");
    }

    #[test]
    fn full_size_leaves_plain_urls_alone() {
        assert_eq!(full_size("https://x/I/71a.jpg"), "https://x/I/71a.jpg");
        assert_eq!(
            full_size("https://x/I/71a._SX38_SY50_CR,0,0,38,50_.png"),
            "https://x/I/71a._AC_SL1500_.png"
        );
    }
}
