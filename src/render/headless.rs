//! Headless Chrome render client
//!
//! Loads each page in a fresh Chrome tab, lets client-side scripts run, and
//! reads hyperlinks out of the rendered DOM. headless_chrome is synchronous,
//! so every render runs on the blocking thread pool.

use crate::config::{RendererConfig, UserAgentConfig};
use crate::render::{PageRenderer, RenderedPage};
use crate::RenderError;
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Collects the DOM's resolved `href` property of every anchor
const LINKS_SCRIPT: &str =
    "JSON.stringify(Array.from(document.querySelectorAll('a[href]'), a => a.href))";

/// Render client backed by a Chrome instance
pub struct HeadlessRenderer {
    browser: Arc<Mutex<Browser>>,
    timeout: Duration,
    settle_delay: Duration,
    user_agent: String,
}

impl HeadlessRenderer {
    /// Launches Chrome according to the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(HeadlessRenderer)` - Browser is running
    /// * `Err(RenderError::Launch)` - Chrome could not be found or started
    pub fn launch(
        config: &RendererConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, RenderError> {
        let timeout = Duration::from_secs(config.page_load_timeout);

        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .idle_browser_timeout(timeout.max(Duration::from_secs(300)))
            .build()
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        let browser = Browser::new(options).map_err(|e| RenderError::Launch(e.to_string()))?;
        tracing::debug!("Chrome launched (headless: {})", config.headless);

        Ok(Self {
            browser: Arc::new(Mutex::new(browser)),
            timeout,
            settle_delay: Duration::from_millis(config.settle_delay),
            user_agent: user_agent.header_value(),
        })
    }

    /// Synchronous render (runs in blocking thread)
    fn render_sync(
        browser: &Mutex<Browser>,
        url: &str,
        timeout: Duration,
        settle_delay: Duration,
        user_agent: &str,
    ) -> Result<RenderedPage, RenderError> {
        let browser_error = |e: anyhow::Error| RenderError::Browser {
            url: url.to_string(),
            message: e.to_string(),
        };

        let tab = {
            let browser = lock_recovering(browser);
            browser.new_tab().map_err(browser_error)?
        };

        tab.set_default_timeout(timeout);
        tab.set_user_agent(user_agent, None, None)
            .map_err(browser_error)?;

        let outcome = tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(browser_error)
            .and_then(|tab| {
                if !settle_delay.is_zero() {
                    std::thread::sleep(settle_delay);
                }

                let final_url = tab.get_url();
                let evaluated = tab.evaluate(LINKS_SCRIPT, false).map_err(browser_error)?;
                let links = match evaluated.value {
                    Some(serde_json::Value::String(json)) => parse_link_list(&json),
                    _ => Vec::new(),
                };

                Ok(RenderedPage::new(final_url, links))
            });

        if let Err(e) = tab.close(true) {
            tracing::debug!("Failed to close tab for {}: {}", url, e);
        }

        outcome
    }
}

#[async_trait]
impl PageRenderer for HeadlessRenderer {
    async fn render(&self, url: &str) -> Result<RenderedPage, RenderError> {
        let browser = Arc::clone(&self.browser);
        let url_owned = url.to_string();
        let timeout = self.timeout;
        let settle_delay = self.settle_delay;
        let user_agent = self.user_agent.clone();

        let page = tokio::task::spawn_blocking(move || {
            Self::render_sync(&browser, &url_owned, timeout, settle_delay, &user_agent)
        })
        .await
        .map_err(|e| RenderError::TaskJoin(e.to_string()))??;

        tracing::trace!("{} -> {} ({} links)", url, page.final_url, page.links.len());
        Ok(page)
    }
}

/// Locks the shared browser, recovering it if a previous render panicked
///
/// A panic mid-render leaves the browser itself usable; each render opens
/// and closes its own tab.
fn lock_recovering<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Decodes the JSON array produced by [`LINKS_SCRIPT`], keeping http(s) links
fn parse_link_list(json: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(json) {
        Ok(links) => links
            .into_iter()
            .filter(|link| link.starts_with("http://") || link.starts_with("https://"))
            .collect(),
        Err(e) => {
            tracing::debug!("Unexpected link list from browser: {}", e);
            Vec::new()
        }
    }
}
