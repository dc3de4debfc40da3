use shelfscan_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API returned {status} for {range}: {message}")]
    Api {
        status: u16,
        range: String,
        message: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("row {0} is outside the sheet")]
    InvalidRow(u32),
}
