//! HTTP render client
//!
//! Fetches pages over plain HTTP and extracts links from the static HTML.
//! Redirects are followed by the client; the URL the response finally came
//! from is reported as the rendered URL. Client-side scripts are not run, so
//! sites that build navigation in JavaScript need the headless renderer.

use crate::config::{RendererConfig, UserAgentConfig};
use crate::render::parser::extract_links;
use crate::render::{PageRenderer, RenderedPage};
use crate::robots::RobotsCache;
use crate::url::parse_http_url;
use crate::RenderError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Maximum redirect hops followed for one render
const MAX_REDIRECTS: usize = 10;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The render client configuration (timeouts)
/// * `user_agent` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use click_distance::config::{RendererConfig, UserAgentConfig};
/// use click_distance::render::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "ClickDistance".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://example.edu/about".to_string(),
///     contact_email: "ops@example.edu".to_string(),
/// };
///
/// let client = build_http_client(&RendererConfig::default(), &user_agent).unwrap();
/// ```
pub fn build_http_client(
    config: &RendererConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.page_load_timeout);

    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Render client backed by reqwest and scraper
pub struct HttpRenderer {
    client: Client,
    user_agent: String,
    robots: Option<RobotsCache>,
}

impl HttpRenderer {
    /// Creates a renderer from configuration
    pub fn new(
        config: &RendererConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config, user_agent)?;
        Ok(Self::with_client(
            client,
            user_agent.crawler_name.clone(),
            config.respect_robots,
        ))
    }

    /// Creates a renderer around an existing client
    ///
    /// `robots_agent` is the product token matched against robots.txt groups.
    pub fn with_client(client: Client, robots_agent: String, respect_robots: bool) -> Self {
        Self {
            client,
            user_agent: robots_agent,
            robots: respect_robots.then(RobotsCache::new),
        }
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    /// Fetches a page and extracts its links
    ///
    /// # Request Flow
    ///
    /// 1. Validate the URL (absolute http/https)
    /// 2. Consult robots.txt when enabled
    /// 3. GET, following up to 10 redirects
    /// 4. Classify the response
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Timeout | `RenderError::Timeout` |
    /// | Connection / TLS / redirect-limit error | `RenderError::Http` |
    /// | Non-2xx status | `RenderError::Status` |
    /// | 2xx, not HTML | page with no links |
    /// | 2xx, HTML | page with extracted links |
    async fn render(&self, url: &str) -> Result<RenderedPage, RenderError> {
        let parsed = parse_http_url(url).map_err(|e| RenderError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if let Some(robots) = &self.robots {
            if !robots.is_allowed(&self.client, &parsed, &self.user_agent).await {
                return Err(RenderError::RobotsDenied {
                    url: url.to_string(),
                });
            }
        }

        let response = self
            .client
            .get(parsed.as_str())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RenderError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    RenderError::Http {
                        url: url.to_string(),
                        source: e,
                    }
                }
            })?;

        let status = response.status();
        let final_url = response.url().clone();

        if !status.is_success() {
            return Err(RenderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            tracing::debug!(
                "{} is {} rather than HTML, no links extracted",
                final_url,
                content_type
            );
            return Ok(RenderedPage::new(final_url.to_string(), Vec::new()));
        }

        let body = response.text().await.map_err(|e| RenderError::Http {
            url: url.to_string(),
            source: e,
        })?;

        let links = extract_links(&body, &final_url);
        tracing::trace!("{} -> {} ({} links)", url, final_url, links.len());

        Ok(RenderedPage::new(final_url.to_string(), links))
    }
}
