use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::ConfigError;

/// Site name → product page URL, kept in the order the caller listed them.
/// Iteration order is the processing order.
///
/// Keys are free-form on purpose: a name with no registered extractor is
/// still accepted here and reported by the orchestrator.
pub type SiteUrls = IndexMap<String, String>;

#[derive(Debug, Deserialize)]
pub struct TargetsFile {
    pub targets: SiteUrls,
}

/// Load and validate the scrape targets from a YAML file.
///
/// ```yaml
/// targets:
///   amazon: https://www.amazon.com/dp/B0EXAMPLE
///   ebay: https://www.ebay.com/itm/1234567890
/// ```
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_targets(path: &Path) -> Result<TargetsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TargetsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let targets_file: TargetsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::TargetsFileParse)?;

    validate_targets(&targets_file.targets)?;

    Ok(targets_file)
}

/// Checks that the map is non-empty and every entry has a site name and an
/// `http(s)` URL.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] describing the first bad entry.
pub fn validate_targets(targets: &SiteUrls) -> Result<(), ConfigError> {
    if targets.is_empty() {
        return Err(ConfigError::Validation(
            "at least one target is required".to_string(),
        ));
    }

    for (site, url) in targets {
        if site.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site name must be non-empty".to_string(),
            ));
        }
        let url = url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "target '{site}' has invalid URL '{url}'; expected http(s)"
            )));
        }
    }

    Ok(())
}
