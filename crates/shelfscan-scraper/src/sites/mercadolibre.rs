use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use shelfscan_core::{ProductRecord, SiteId};

use super::{extract_common, set_price, upgrade_images, PageSelectors};
use crate::extract::SiteExtractor;
use crate::select::{first_attr, labelled_rows, merge_missing};

/// Gallery thumbnails end in `-R`, `-I` or `-V`; `-O` is the original upload.
static THUMB_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-[RIV]\.(jpe?g|png|webp)$").expect("valid mercadolibre image regex")
});

const SELECTORS: PageSelectors = PageSelectors {
    name: &["h1.ui-pdp-title"],
    price: &[".ui-pdp-price__second-line .andes-money-amount__fraction"],
    description: &[".ui-pdp-description__content"],
    images: &[".ui-pdp-gallery__figure img"],
    image_attrs: &["data-zoom", "src"],
    vendor: &[".ui-pdp-seller__link-trigger"],
    availability: &[".ui-pdp-buybox__quantity__available"],
    reviews: &[".ui-pdp-review__amount"],
};

fn full_size(url: &str) -> String {
    THUMB_SUFFIX_RE.replace(url, "-O.${1}").into_owned()
}

pub struct MercadoLibre;

impl SiteExtractor for MercadoLibre {
    fn site(&self) -> SiteId {
        SiteId::MercadoLibre
    }

    fn extract(&self, html: &str, url: &str) -> ProductRecord {
        let doc = Html::parse_document(html);
        let mut record = extract_common(&doc, &SELECTORS, SiteId::MercadoLibre, url);

        // Structured price metadata is exact; the visible fraction drops cents.
        if let Some(meta_price) = first_attr(&doc, &[r#"meta[itemprop="price"]"#], &["content"]) {
            set_price(&mut record, meta_price);
        }

        record.images = upgrade_images(record.images, full_size);

        let mut attributes = labelled_rows(&doc, ".andes-table tr", "th", "td");
        merge_missing(
            &mut attributes,
            labelled_rows(&doc, ".ui-vpp-striped-specs__table tr", "th", "td"),
        );
        record.attributes = attributes;

        record
    }
}
