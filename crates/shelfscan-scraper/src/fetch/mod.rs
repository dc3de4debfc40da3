//! Page fetching: the seam between the orchestrator and the network.
//!
//! [`HttpFetcher`] returns the server-rendered HTML. With the `browser`
//! feature, [`BrowserFetcher`] drives headless Chrome so client-side markup
//! is present before extraction.

#[cfg(feature = "browser")]
mod browser;
mod http;

use std::future::Future;
use std::time::Duration;

use shelfscan_core::{AppConfig, FetcherKind};

use crate::error::ScraperError;

#[cfg(feature = "browser")]
pub use browser::BrowserFetcher;
pub use http::HttpFetcher;

/// Source of page HTML for the extractors.
pub trait PageFetcher: Send + Sync {
    /// Loads `url` and returns its HTML once the page has settled.
    ///
    /// `wait_hint` is the extractor's settle delay; fetchers that do not
    /// render scripts ignore it.
    fn fetch_rendered_html(
        &self,
        url: &str,
        wait_hint: Duration,
    ) -> impl Future<Output = Result<String, ScraperError>> + Send;
}

/// The fetcher selected by [`AppConfig::fetcher`].
pub enum AnyFetcher {
    Http(HttpFetcher),
    #[cfg(feature = "browser")]
    Browser(BrowserFetcher),
}

impl AnyFetcher {
    /// Builds the configured fetcher. A browser session, when selected, is
    /// launched here and reused for every page.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::BrowserUnavailable`] when the browser fetcher
    /// is configured but the crate was built without the `browser` feature,
    /// or any error raised while building the client or launching Chrome.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        match config.fetcher {
            FetcherKind::Http => Ok(Self::Http(HttpFetcher::new(
                config.page_load_timeout_secs,
                &config.user_agent,
            )?)),
            #[cfg(feature = "browser")]
            FetcherKind::Browser => Ok(Self::Browser(BrowserFetcher::launch(
                config.headless,
                config.page_load_timeout_secs,
                &config.user_agent,
            )?)),
            #[cfg(not(feature = "browser"))]
            FetcherKind::Browser => Err(ScraperError::BrowserUnavailable),
        }
    }
}

impl PageFetcher for AnyFetcher {
    async fn fetch_rendered_html(
        &self,
        url: &str,
        wait_hint: Duration,
    ) -> Result<String, ScraperError> {
        match self {
            Self::Http(fetcher) => fetcher.fetch_rendered_html(url, wait_hint).await,
            #[cfg(feature = "browser")]
            Self::Browser(fetcher) => fetcher.fetch_rendered_html(url, wait_hint).await,
        }
    }
}
