use shelfscan_core::RowSchemaKind;

/// Column layout of the detailed purchase sheet, in persisted order.
pub const DETAILED_HEADERS: [&str; 39] = [
    "original_url",
    "title_en",
    "description_en",
    "price_source",
    "currency_source",
    "image_urls",
    "Model",
    "MPN",
    "SKU",
    "UPC",
    "GTIN",
    "Color",
    "Size",
    "Condition",
    "Warranty",
    "Free Shipping",
    "Shipping Cost",
    "Available Qty",
    "Buying Mode",
    "Listing Type",
    "Category",
    "Cost USD",
    "Cost MXN",
    "Vendor",
    "Platform",
    "Product URL",
    "Images (JSON)",
    "Attributes (JSON)",
    "Description",
    "Domain",
    "Status",
    "brand",
    "model",
    "permalink",
    "thumbnail_url",
    "seller_sku",
    "Reviews",
    "Availability",
    "Scraped At",
];

pub const BASIC_HEADERS: [&str; 5] = ["Name", "Price", "Description", "Image URL", "Link"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSchema {
    Detailed,
    Basic,
}

impl RowSchema {
    #[must_use]
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            RowSchema::Detailed => &DETAILED_HEADERS,
            RowSchema::Basic => &BASIC_HEADERS,
        }
    }

    /// Number of cells in every projected row.
    #[must_use]
    pub fn width(self) -> usize {
        self.headers().len()
    }

    /// A1 column letter of the last column, e.g. `"AM"` for the detailed
    /// schema.
    #[must_use]
    pub fn last_column(self) -> String {
        column_letter(self.width())
    }
}

impl From<RowSchemaKind> for RowSchema {
    fn from(kind: RowSchemaKind) -> Self {
        match kind {
            RowSchemaKind::Detailed => RowSchema::Detailed,
            RowSchemaKind::Basic => RowSchema::Basic,
        }
    }
}

/// A1 column letter for a 1-based column index (`1` → `"A"`, `27` → `"AA"`).
/// Index `0` is treated as `1`.
#[must_use]
pub fn column_letter(index: usize) -> String {
    let mut n = index.max(1);
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        // rem < 26, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation)]
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
