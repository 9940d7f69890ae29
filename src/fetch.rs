use std::thread;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use tracing::{debug, info};

use crate::error::MonitorError;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36";

/// Source of rendered category-page markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fully rendered document text for `url`.
    async fn fetch_page(&self, url: &str) -> Result<String, MonitorError>;
}

/// Fetcher backed by headless Chrome. The shop fills its product grid from
/// script, so a plain GET only returns an empty shell.
pub struct ChromeFetcher {
    browser: Browser,
}

impl ChromeFetcher {
    /// Launch headless Chrome once for the lifetime of the run
    pub fn new() -> Result<Self, MonitorError> {
        info!("Launching headless Chrome...");
        let browser = launch_browser().map_err(MonitorError::Fetch)?;
        Ok(Self { browser })
    }

    fn render(&self, url: &str) -> anyhow::Result<String> {
        let tab = self.browser.new_tab()?;
        tab.set_user_agent(USER_AGENT, Some("ja-JP"), None)
            .context("Failed to set user agent")?;
        tab.navigate_to(url).context("Failed to navigate to page")?;
        tab.wait_until_navigated()
            .context("Page never finished loading")?;

        // The product grid is filled in by script after navigation
        info!("Waiting for the page to settle...");
        thread::sleep(Duration::from_secs(8));

        let html = tab.get_content()?;
        debug!("Rendered {} bytes of markup", html.len());
        Ok(html)
    }
}

fn launch_browser() -> anyhow::Result<Browser> {
    let options = LaunchOptions::default_builder()
        .headless(true)
        .build()
        .context("Failed to build launch options")?;
    Browser::new(options).context("Failed to launch Chrome browser")
}

#[async_trait]
impl PageFetcher for ChromeFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, MonitorError> {
        info!("Rendering {} in headless Chrome...", url);
        self.render(url).map_err(MonitorError::Fetch)
    }
}
