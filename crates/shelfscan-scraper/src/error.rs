use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("empty page body from {url}")]
    EmptyBody { url: String },

    #[error("browser error: {0}")]
    Browser(String),

    #[error("browser fetcher requested but shelfscan-scraper was built without the `browser` feature")]
    BrowserUnavailable,
}
