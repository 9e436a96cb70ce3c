//! In-memory site used to drive navigation tests

use crate::render::{PageRenderer, RenderedPage};
use crate::RenderError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A scripted site: every known URL has a final URL and a list of links
///
/// Unknown URLs fail with a 404, so tests can model dead pages by leaving
/// them out.
#[derive(Default)]
pub struct ScriptedRenderer {
    pages: HashMap<String, Vec<String>>,
    redirects: HashMap<String, String>,
    renders: AtomicUsize,
    log: Mutex<Vec<String>>,
}

impl ScriptedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page with the given outbound links
    pub fn page(mut self, url: &str, links: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            links.iter().map(|l| l.to_string()).collect(),
        );
        self
    }

    /// Makes `from` resolve to `to`; the links served are those of `to`
    pub fn redirect(mut self, from: &str, to: &str) -> Self {
        self.redirects.insert(from.to_string(), to.to_string());
        self
    }

    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    /// Every URL rendered, in call order
    pub fn rendered_urls(&self) -> Vec<String> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageRenderer for ScriptedRenderer {
    async fn render(&self, url: &str) -> Result<RenderedPage, RenderError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut log) = self.log.lock() {
            log.push(url.to_string());
        }

        let final_url = self
            .redirects
            .get(url)
            .cloned()
            .unwrap_or_else(|| url.to_string());

        match self.pages.get(&final_url) {
            Some(links) => Ok(RenderedPage::new(final_url, links.clone())),
            None if final_url != url => Ok(RenderedPage::new(final_url, Vec::new())),
            None => Err(RenderError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
