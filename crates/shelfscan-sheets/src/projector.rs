//! Flattens a [`ProductRecord`] into one spreadsheet row.
//!
//! Projection is pure and total: every record, placeholders included,
//! becomes a row exactly [`RowSchema::width`] cells wide.

use std::str::FromStr;

use rust_decimal::Decimal;
use shelfscan_core::ProductRecord;
use shelfscan_scraper::clean::{lookup_attribute, truncate_chars};
use shelfscan_scraper::host_of;

use crate::schema::RowSchema;

/// Google Sheets rejects cells longer than this.
pub const MAX_CELL_CHARS: usize = 50_000;
pub const MAX_TITLE_CHARS: usize = 500;
pub const MAX_DESCRIPTION_CHARS: usize = 5_000;

const BRAND: &[&str] = &["brand", "marca", "manufacturer", "fabricante"];
const MODEL: &[&str] = &["model", "modelo"];
const MPN: &[&str] = &["mpn", "part number", "número de parte"];
const SKU: &[&str] = &["sku"];
const UPC: &[&str] = &["upc"];
const GTIN: &[&str] = &["gtin", "ean"];
const COLOR: &[&str] = &["color", "colour"];
const SIZE: &[&str] = &["size", "talla", "tamaño"];
const CONDITION: &[&str] = &["condition", "condición", "estado"];
const WARRANTY: &[&str] = &["warranty", "garantía"];
const CATEGORY: &[&str] = &["category", "categoría"];
const SELLER_SKU: &[&str] = &["seller sku"];

/// Country-code suffixes, checked before any marketplace rule.
const COUNTRY_CURRENCIES: [(&str, &str); 6] = [
    (".mx", "MXN"),
    (".ca", "CAD"),
    (".co.uk", "GBP"),
    (".com.ar", "ARS"),
    (".com.co", "COP"),
    (".cl", "CLP"),
];

/// ISO currency code implied by the listing's host. Defaults to `USD`.
#[must_use]
pub fn infer_currency(url: &str) -> &'static str {
    let Some(host) = host_of(url) else {
        return "USD";
    };

    if let Some((_, code)) = COUNTRY_CURRENCIES
        .iter()
        .find(|(suffix, _)| host.ends_with(suffix))
    {
        return code;
    }
    if host.contains("mercadolibre") {
        return "MXN";
    }
    "USD"
}

/// Numeric price with at most two decimal places, or `None` when the
/// cleaned price is empty or not a number.
fn parse_cost(price: &str) -> Option<Decimal> {
    Decimal::from_str(price).ok().map(|d| d.round_dp(2))
}

fn cell(value: &str) -> String {
    truncate_chars(value, MAX_CELL_CHARS)
}

/// Projects `record` into a row laid out as `schema` describes.
#[must_use]
pub fn project(record: &ProductRecord, schema: RowSchema) -> Vec<String> {
    let row = match schema {
        RowSchema::Detailed => detailed(record),
        RowSchema::Basic => basic(record),
    };
    debug_assert_eq!(row.len(), schema.width());
    row.iter().map(|value| cell(value)).collect()
}

fn basic(record: &ProductRecord) -> Vec<String> {
    vec![
        truncate_chars(&record.name, MAX_TITLE_CHARS),
        record.price_raw.clone(),
        truncate_chars(&record.description, MAX_DESCRIPTION_CHARS),
        record.primary_image().unwrap_or_default().to_string(),
        record.url.clone(),
    ]
}

fn detailed(record: &ProductRecord) -> Vec<String> {
    let attrs = &record.attributes;
    let currency = infer_currency(&record.url);
    let cost = parse_cost(&record.price).map(|d| d.to_string());
    let (cost_usd, cost_mxn) = match currency {
        "USD" => (cost.unwrap_or_default(), String::new()),
        "MXN" => (String::new(), cost.unwrap_or_default()),
        _ => (String::new(), String::new()),
    };
    let model = lookup_attribute(attrs, MODEL);
    let description = truncate_chars(&record.description, MAX_DESCRIPTION_CHARS);
    let images_json = serde_json::to_string(&record.images).unwrap_or_default();
    let attributes_json = serde_json::to_string(attrs).unwrap_or_default();

    vec![
        record.url.clone(),
        truncate_chars(&record.name, MAX_TITLE_CHARS),
        description.clone(),
        record.price.clone(),
        currency.to_string(),
        record.images.join(","),
        model.clone(),
        lookup_attribute(attrs, MPN),
        lookup_attribute(attrs, SKU),
        lookup_attribute(attrs, UPC),
        lookup_attribute(attrs, GTIN),
        lookup_attribute(attrs, COLOR),
        lookup_attribute(attrs, SIZE),
        lookup_attribute(attrs, CONDITION),
        lookup_attribute(attrs, WARRANTY),
        // Shipping, quantity and listing columns are marketplace API data
        // that product pages do not expose.
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        lookup_attribute(attrs, CATEGORY),
        cost_usd,
        cost_mxn,
        record.vendor.clone(),
        record.site.as_str().to_string(),
        record.url.clone(),
        images_json,
        attributes_json,
        description,
        host_of(&record.url).unwrap_or_default(),
        record.status.as_str().to_string(),
        lookup_attribute(attrs, BRAND),
        model,
        record.url.clone(),
        record.primary_image().unwrap_or_default().to_string(),
        lookup_attribute(attrs, SELLER_SKU),
        record.reviews.clone(),
        record.availability.clone(),
        record.fetched_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]
}
