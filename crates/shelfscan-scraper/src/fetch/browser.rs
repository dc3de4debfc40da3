use std::ffi::OsStr;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};

use super::PageFetcher;
use crate::error::ScraperError;

fn browser_err(e: impl std::fmt::Display) -> ScraperError {
    ScraperError::Browser(e.to_string())
}

/// Headless Chrome session shared by every page of a run.
///
/// All CDP calls block, so each fetch runs on Tokio's blocking pool with its
/// own tab.
#[derive(Clone)]
pub struct BrowserFetcher {
    browser: Browser,
    page_load_timeout: Duration,
    user_agent: String,
}

impl BrowserFetcher {
    /// Launches Chrome once.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if the launch options are rejected
    /// or no Chrome binary can be started.
    pub fn launch(
        headless: bool,
        page_load_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        let page_load_timeout = Duration::from_secs(page_load_timeout_secs);
        let options = LaunchOptions::default_builder()
            .headless(headless)
            .sandbox(false)
            .window_size(Some((1920, 1080)))
            // Must outlast a page load plus its settle delay.
            .idle_browser_timeout(page_load_timeout.saturating_mul(4))
            .args(vec![
                OsStr::new("--disable-gpu"),
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--disable-blink-features=AutomationControlled"),
            ])
            .build()
            .map_err(browser_err)?;

        let browser = Browser::new(options).map_err(browser_err)?;
        tracing::info!(headless, "launched headless browser");

        Ok(Self {
            browser,
            page_load_timeout,
            user_agent: user_agent.to_string(),
        })
    }
}

fn navigate_and_capture(
    tab: &Tab,
    url: &str,
    user_agent: &str,
    wait_hint: Duration,
) -> Result<String, ScraperError> {
    tab.set_user_agent(user_agent, None, None)
        .map_err(browser_err)?;
    tab.navigate_to(url).map_err(browser_err)?;
    tab.wait_until_navigated().map_err(browser_err)?;
    std::thread::sleep(wait_hint);
    tab.get_content().map_err(browser_err)
}

fn render(
    browser: &Browser,
    url: &str,
    user_agent: &str,
    page_load_timeout: Duration,
    wait_hint: Duration,
) -> Result<String, ScraperError> {
    let tab = browser.new_tab().map_err(browser_err)?;
    tab.set_default_timeout(page_load_timeout);

    let content = navigate_and_capture(&tab, url, user_agent, wait_hint);

    if let Err(e) = tab.close(true) {
        tracing::debug!(url, error = %e, "failed to close browser tab");
    }

    let content = content?;
    if content.trim().is_empty() {
        return Err(ScraperError::EmptyBody {
            url: url.to_string(),
        });
    }
    Ok(content)
}

impl PageFetcher for BrowserFetcher {
    async fn fetch_rendered_html(
        &self,
        url: &str,
        wait_hint: Duration,
    ) -> Result<String, ScraperError> {
        let browser = self.browser.clone();
        let url_owned = url.to_string();
        let user_agent = self.user_agent.clone();
        let page_load_timeout = self.page_load_timeout;

        let html = tokio::task::spawn_blocking(move || {
            render(&browser, &url_owned, &user_agent, page_load_timeout, wait_hint)
        })
        .await
        .map_err(|e| ScraperError::Browser(format!("render task failed: {e}")))??;

        tracing::debug!(url, bytes = html.len(), "rendered page");
        Ok(html)
    }
}
