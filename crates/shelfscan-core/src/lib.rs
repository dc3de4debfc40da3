pub mod app_config;
pub mod config;
pub mod product;
pub mod site;
pub mod targets;

pub use app_config::{AppConfig, Environment, FetcherKind, RowSchemaKind, WriteModeKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::{AttributeMap, ProductRecord, ScrapeStatus, NOT_FOUND};
pub use site::{SiteId, UnknownSite};
pub use targets::{load_targets, validate_targets, SiteUrls, TargetsFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read targets file {path}: {source}")]
    TargetsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse targets file: {0}")]
    TargetsFileParse(#[source] serde_yaml::Error),

    #[error("targets validation failed: {0}")]
    Validation(String),
}
