//! Level-by-level navigation search
//!
//! The search renders the root, then builds every page one click further
//! away, one whole level at a time, until a level contains a target or the
//! level threshold is reached.
//!
//! Renders within a level may run concurrently, but their results are
//! consumed in construction order: child filtering, registry updates and the
//! first-hit scan all happen sequentially, so the outcome does not depend on
//! the concurrency setting.

use crate::config::NavigationConfig;
use crate::navigation::{CrawlNode, SearchContext, SearchState, SearchStats, TargetSet};
use crate::render::PageRenderer;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Click count reported when no target was reached
pub const NOT_FOUND_CLICKS: i64 = -1;

/// Input of one navigation computation
#[derive(Debug, Clone)]
pub struct NavigationRequest {
    /// Homepage to start from
    pub root_url: String,

    /// Pages already known to be relevant
    pub target_urls: Vec<String>,

    /// Number of relevant pages found upstream; zero skips the computation
    pub link_count: u32,
}

impl NavigationRequest {
    /// Creates a request whose link count is the number of targets
    pub fn new(root_url: impl Into<String>, target_urls: Vec<String>) -> Self {
        let link_count = u32::try_from(target_urls.len()).unwrap_or(u32::MAX);
        Self {
            root_url: root_url.into(),
            target_urls,
            link_count,
        }
    }

    pub fn with_link_count(mut self, link_count: u32) -> Self {
        self.link_count = link_count;
        self
    }
}

/// Click count and path to the first target reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Clicks from the root, `None` if no target was reached
    pub clicks: Option<u32>,

    /// URLs from the root to the target, inclusive; empty if not found
    pub trace: Vec<String>,
}

impl SearchResult {
    pub fn found(clicks: u32, trace: Vec<String>) -> Self {
        Self {
            clicks: Some(clicks),
            trace,
        }
    }

    pub fn not_found() -> Self {
        Self {
            clicks: None,
            trace: Vec::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        self.clicks.is_some()
    }

    /// Click count with [`NOT_FOUND_CLICKS`] standing in for "not found"
    pub fn clicks_or_sentinel(&self) -> i64 {
        self.clicks.map_or(NOT_FOUND_CLICKS, i64::from)
    }
}

/// Result of a computation together with what it cost
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub result: SearchResult,
    pub stats: SearchStats,
    pub final_state: SearchState,
    pub elapsed: Duration,
}

/// Breadth-first navigation search over a site
pub struct NavigationSearch<'r> {
    renderer: &'r dyn PageRenderer,
    config: NavigationConfig,
}

impl<'r> NavigationSearch<'r> {
    pub fn new(renderer: &'r dyn PageRenderer, config: NavigationConfig) -> Self {
        Self { renderer, config }
    }

    /// Runs one navigation computation
    ///
    /// Every call builds its own [`SearchContext`], so calls are independent
    /// and may run concurrently on the same `NavigationSearch`.
    ///
    /// # Flow
    ///
    /// 1. Skip (not found, no renders) if `link_count` is zero or no targets were given
    /// 2. Build the target set; skip if it ends up empty
    /// 3. Render the root; a hit there is 0 clicks
    /// 4. Build each following level from the previous level's children, stopping
    ///    at the first level that contains a hit, when a level has no children,
    ///    or after `level_threshold` levels
    pub async fn run(&self, request: &NavigationRequest) -> SearchOutcome {
        let started = Instant::now();
        let mut state = SearchState::Init;
        let mut stats = SearchStats::default();

        tracing::info!(
            "Measuring navigation from {} ({} targets, threshold {})",
            request.root_url,
            request.target_urls.len(),
            self.config.level_threshold
        );

        if request.link_count == 0 || request.target_urls.is_empty() {
            tracing::info!("No candidate pages for {}, skipping", request.root_url);
            return self.finish(&mut state, SearchResult::not_found(), stats, started);
        }

        let (targets, target_renders) = TargetSet::build(
            &request.target_urls,
            self.renderer,
            self.config.max_concurrent_renders,
            &mut stats,
        )
        .await;

        if targets.is_empty() {
            tracing::info!(
                "All targets for {} are documents, skipping",
                request.root_url
            );
            return self.finish(&mut state, SearchResult::not_found(), stats, started);
        }

        advance(&mut state, SearchState::RootCheck);
        let mut ctx = SearchContext::with_stats(&request.root_url, targets, stats)
            .with_renders(target_renders);

        let root = CrawlNode::visit(self.renderer, &request.root_url, 0, &[], &mut ctx).await;
        if root.is_hit() {
            let result = SearchResult::found(0, root.trace().to_vec());
            return self.finish(&mut state, result, ctx.stats, started);
        }

        let mut frontier = vec![root];
        let mut level = 0;

        while level < self.config.level_threshold {
            let next_level = level + 1;

            let jobs: Vec<(&CrawlNode, &String)> = frontier
                .iter()
                .flat_map(|node| node.children().iter().map(move |child| (node, child)))
                .collect();

            if jobs.is_empty() {
                tracing::debug!("Frontier at level {} has no children", level);
                break;
            }

            advance(&mut state, SearchState::LevelExpand(next_level));
            let nodes = self.expand_level(&jobs, next_level, &mut ctx).await;
            ctx.stats.levels_expanded = next_level;

            tracing::debug!("Built {} nodes at level {}", nodes.len(), next_level);

            if let Some(hit) = nodes.iter().find(|node| node.is_hit()) {
                let result = SearchResult::found(next_level, hit.trace().to_vec());
                return self.finish(&mut state, result, ctx.stats, started);
            }

            frontier = nodes;
            level = next_level;
        }

        self.finish(&mut state, SearchResult::not_found(), ctx.stats, started)
    }

    /// Builds one node per (parent, child URL) job, in job order
    ///
    /// Pages already rendered while preparing targets are not rendered again.
    async fn expand_level(
        &self,
        jobs: &[(&CrawlNode, &String)],
        level: u32,
        ctx: &mut SearchContext,
    ) -> Vec<CrawlNode> {
        let remembered: Vec<_> = jobs.iter().map(|(_, url)| ctx.take_render(url)).collect();

        let renderer = self.renderer;
        let renders: Vec<_> = stream::iter(jobs.iter().zip(remembered))
            .map(|((_, url), remembered)| async move {
                match remembered {
                    Some(render) => (render, false),
                    None => (renderer.render(url).await, true),
                }
            })
            .buffered(self.config.max_concurrent_renders.max(1))
            .collect()
            .await;

        jobs.iter()
            .zip(renders)
            .map(|((parent, url), (render, fresh))| {
                if fresh {
                    ctx.stats.record_render(render.is_ok());
                }
                CrawlNode::from_render(url, level, parent.trace(), render, ctx)
            })
            .collect()
    }

    fn finish(
        &self,
        state: &mut SearchState,
        result: SearchResult,
        stats: SearchStats,
        started: Instant,
    ) -> SearchOutcome {
        let terminal = if result.is_found() {
            SearchState::Found
        } else {
            SearchState::NotFound
        };
        advance(state, terminal);

        match &result.clicks {
            Some(clicks) => tracing::info!(
                "Target reached in {} clicks via {}",
                clicks,
                result.trace.join(" -> ")
            ),
            None => tracing::info!("No target reached ({} renders)", stats.renders),
        }

        SearchOutcome {
            result,
            stats,
            final_state: *state,
            elapsed: started.elapsed(),
        }
    }
}

fn advance(state: &mut SearchState, next: SearchState) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal search transition {} -> {}",
        state,
        next
    );
    tracing::trace!("Search state {} -> {}", state, next);
    *state = next;
}
