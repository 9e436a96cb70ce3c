//! Report rows for measured sites

use crate::config::SiteEntry;
use crate::navigation::SearchOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The navigation result of one site, ready for display
#[derive(Debug, Clone, Serialize)]
pub struct SiteReport {
    /// Site name from the configuration
    pub name: String,

    /// Homepage the search started from
    pub root_url: String,

    /// Minimum clicks to a target, or -1 if none was reached
    pub clicks: i64,

    /// Path from the root to the target reached; empty if none
    pub trace: Vec<String>,

    /// Renderer calls made, target canonicalization included
    pub renders: usize,

    /// Renders that failed and were degraded
    pub render_failures: usize,

    /// Pages turned into crawl nodes
    pub nodes_built: usize,

    /// Wall time of the computation in milliseconds
    pub elapsed_ms: u64,

    /// When the computation finished
    pub computed_at: DateTime<Utc>,
}

impl SiteReport {
    pub fn from_outcome(site: &SiteEntry, outcome: &SearchOutcome) -> Self {
        Self {
            name: site.name.clone(),
            root_url: site.root.clone(),
            clicks: outcome.result.clicks_or_sentinel(),
            trace: outcome.result.trace.clone(),
            renders: outcome.stats.renders,
            render_failures: outcome.stats.render_failures,
            nodes_built: outcome.stats.nodes_built,
            elapsed_ms: u64::try_from(outcome.elapsed.as_millis()).unwrap_or(u64::MAX),
            computed_at: Utc::now(),
        }
    }

    pub fn is_found(&self) -> bool {
        self.clicks >= 0
    }
}
