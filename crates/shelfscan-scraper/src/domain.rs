//! Maps a product URL to the [`SiteId`] whose extractor understands it.

use shelfscan_core::SiteId;

/// Root domains checked as substrings of the host, first match wins.
/// MercadoLibre runs one storefront per country TLD, so only its name is
/// matched.
const KNOWN_DOMAINS: [(&str, SiteId); 5] = [
    ("gunmagwarehouse.com", SiteId::GunMagWarehouse),
    ("ebay.com", SiteId::Ebay),
    ("amazon.com", SiteId::Amazon),
    ("academy.com", SiteId::Academy),
    ("mercadolibre.", SiteId::MercadoLibre),
];

/// Identifies the storefront behind `url`.
///
/// Never fails: unparseable URLs and unrecognized hosts both map to
/// [`SiteId::Unknown`].
#[must_use]
pub fn detect(url: &str) -> SiteId {
    let Some(host) = host_of(url) else {
        return SiteId::Unknown;
    };

    KNOWN_DOMAINS
        .iter()
        .find(|(root, _)| host.contains(root))
        .map_or(SiteId::Unknown, |(_, site)| *site)
}

/// Lowercased hostname of `url` with any leading `www.` removed.
///
/// Returns `None` when the URL cannot be parsed or has no host.
#[must_use]
pub fn host_of(url: &str) -> Option<String> {
    let parsed = match reqwest::Url::parse(url.trim()) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(url, error = %e, "could not parse URL for domain detection");
            return None;
        }
    };

    let host = parsed.host_str()?.to_ascii_lowercase();
    Some(match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    })
}
