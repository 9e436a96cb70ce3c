//! Page render clients
//!
//! A render turns a URL into the URL the page finally resolved to plus the
//! hyperlinks found on it. The navigation core only sees the [`PageRenderer`]
//! trait; two implementations are provided:
//! - [`HttpRenderer`]: plain HTTP fetch with static HTML link extraction
//! - [`HeadlessRenderer`]: Chrome-rendered DOM, including client-side scripts

mod headless;
mod http;
mod parser;

pub use headless::HeadlessRenderer;
pub use http::{build_http_client, HttpRenderer};
pub use parser::extract_links;

use crate::config::{RenderMode, RendererConfig, UserAgentConfig};
use crate::{NavError, RenderError};
use async_trait::async_trait;
use std::sync::Arc;

/// Outcome of rendering one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// URL the page resolved to after any redirects
    pub final_url: String,

    /// Absolute hyperlink targets found on the page, in document order
    pub links: Vec<String>,
}

impl RenderedPage {
    pub fn new(final_url: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            final_url: final_url.into(),
            links,
        }
    }
}

/// Loads and renders a page, following redirects
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Renders `url`, returning its final URL and outbound links
    async fn render(&self, url: &str) -> Result<RenderedPage, RenderError>;
}

#[async_trait]
impl<R: PageRenderer + ?Sized> PageRenderer for Arc<R> {
    async fn render(&self, url: &str) -> Result<RenderedPage, RenderError> {
        (**self).render(url).await
    }
}

/// Builds the render client selected by the configuration
///
/// # Returns
///
/// * `Ok(Arc<dyn PageRenderer>)` - Ready-to-use render client
/// * `Err(NavError)` - The HTTP client or browser could not be started
pub fn build_renderer(
    config: &RendererConfig,
    user_agent: &UserAgentConfig,
) -> Result<Arc<dyn PageRenderer>, NavError> {
    match config.mode {
        RenderMode::Http => {
            tracing::info!("Using HTTP renderer");
            Ok(Arc::new(HttpRenderer::new(config, user_agent)?))
        }
        RenderMode::Headless => {
            tracing::info!(
                "Using Chrome renderer (headless: {})",
                config.headless
            );
            Ok(Arc::new(HeadlessRenderer::launch(config, user_agent)?))
        }
    }
}
