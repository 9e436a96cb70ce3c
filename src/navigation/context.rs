use crate::navigation::{TargetSet, VisitedRegistry};
use crate::render::RenderedPage;
use crate::url::{is_skipped_link, strip_fragment, within_root};
use crate::RenderError;
use serde::Serialize;
use std::collections::HashMap;

/// Render outcomes keyed by the URL that was requested
pub type RenderMemo = HashMap<String, Result<RenderedPage, RenderError>>;

/// Counters gathered over one computation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Renderer calls, including target canonicalization
    pub renders: usize,

    /// Renders that failed and were degraded
    pub render_failures: usize,

    /// Crawl nodes constructed, root included
    pub nodes_built: usize,

    /// Levels beyond the root that were fully built
    pub levels_expanded: u32,
}

impl SearchStats {
    pub fn record_render(&mut self, succeeded: bool) {
        self.renders += 1;
        if !succeeded {
            self.render_failures += 1;
        }
    }
}

/// All mutable state of one navigation computation
///
/// Created when a search starts and dropped when it returns; nothing here
/// outlives or leaks between computations.
#[derive(Debug)]
pub struct SearchContext {
    pub root_url: String,
    pub targets: TargetSet,
    pub visited: VisitedRegistry,
    pub stats: SearchStats,
    renders: RenderMemo,
}

impl SearchContext {
    /// Creates a context whose registry holds only the root
    pub fn new(root_url: &str, targets: TargetSet) -> Self {
        Self::with_stats(root_url, targets, SearchStats::default())
    }

    /// Creates a context that continues counting from `stats`
    pub fn with_stats(root_url: &str, targets: TargetSet, stats: SearchStats) -> Self {
        Self {
            root_url: root_url.to_string(),
            targets,
            visited: VisitedRegistry::with_root(root_url),
            stats,
            renders: RenderMemo::new(),
        }
    }

    /// Seeds the context with renders already made for this computation
    ///
    /// A node whose URL was rendered while preparing targets takes that
    /// outcome instead of rendering the page again.
    pub fn with_renders(mut self, renders: RenderMemo) -> Self {
        self.renders = renders;
        self
    }

    /// Removes and returns the remembered render of `url`, if any
    ///
    /// Each URL becomes a node at most once, so an entry is only ever taken once.
    pub fn take_render(&mut self, url: &str) -> Option<Result<RenderedPage, RenderError>> {
        self.renders.remove(url)
    }

    /// Filters a page's outbound links down to new children and registers them
    ///
    /// A link survives if, after dropping its fragment, it contains the root
    /// URL, is not yet registered, and is not a PDF or image. Survivors keep
    /// their first-seen order.
    pub fn claim_children(&mut self, links: &[String]) -> Vec<String> {
        let mut children = Vec::new();

        for link in links {
            let link = strip_fragment(link);

            if !within_root(link, &self.root_url) {
                tracing::trace!("Skipping off-site link {}", link);
                continue;
            }

            if is_skipped_link(link) {
                tracing::trace!("Skipping non-page link {}", link);
                continue;
            }

            if self.visited.register(link) {
                children.push(link.to_string());
            }
        }

        children
    }
}
