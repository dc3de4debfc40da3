use serde::{Deserialize, Serialize};

/// Closed set of storefronts the scraper knows how to read.
///
/// `Unknown` is a legitimate value: it means "no extractor is registered for
/// this page", not that anything went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteId {
    Ebay,
    Amazon,
    Academy,
    #[serde(rename = "mercadolibre")]
    MercadoLibre,
    #[serde(rename = "gunmagwarehouse")]
    GunMagWarehouse,
    Unknown,
}

impl SiteId {
    /// Every site with an extractor, in registry order.
    pub const SUPPORTED: [SiteId; 5] = [
        SiteId::GunMagWarehouse,
        SiteId::Ebay,
        SiteId::Amazon,
        SiteId::Academy,
        SiteId::MercadoLibre,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SiteId::Ebay => "ebay",
            SiteId::Amazon => "amazon",
            SiteId::Academy => "academy",
            SiteId::MercadoLibre => "mercadolibre",
            SiteId::GunMagWarehouse => "gunmagwarehouse",
            SiteId::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        self != SiteId::Unknown
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a site name is not one of the [`SiteId`] identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown site identifier: {0:?}")]
pub struct UnknownSite(pub String);

impl std::str::FromStr for SiteId {
    type Err = UnknownSite;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ebay" => Ok(SiteId::Ebay),
            "amazon" => Ok(SiteId::Amazon),
            "academy" => Ok(SiteId::Academy),
            "mercadolibre" => Ok(SiteId::MercadoLibre),
            "gunmagwarehouse" => Ok(SiteId::GunMagWarehouse),
            "unknown" => Ok(SiteId::Unknown),
            _ => Err(UnknownSite(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Amazon".parse::<SiteId>().unwrap(), SiteId::Amazon);
        assert_eq!(
            " MercadoLibre ".parse::<SiteId>().unwrap(),
            SiteId::MercadoLibre
        );
    }

    #[test]
    fn rejects_unregistered_names() {
        let err = "walmart".parse::<SiteId>().unwrap_err();
        assert_eq!(err, UnknownSite("walmart".to_string()));
    }

    #[test]
    fn display_matches_serde_name() {
        for site in SiteId::SUPPORTED {
            let json = serde_json::to_string(&site).unwrap();
            assert_eq!(json, format!("\"{site}\""));
        }
    }

    #[test]
    fn unknown_is_not_supported() {
        assert!(!SiteId::Unknown.is_known());
        assert!(!SiteId::SUPPORTED.contains(&SiteId::Unknown));
    }
}
