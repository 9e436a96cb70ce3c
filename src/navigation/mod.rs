//! Navigation search: minimum on-site clicks from a root page to a target
//!
//! This module contains the core of the crate:
//! - Target preparation (document filtering, canonical URL forms)
//! - The per-computation registry of visited URLs
//! - Crawl nodes (one rendered page each)
//! - Level-by-level search from the root until a target is hit

mod context;
mod node;
mod search;
mod state;
mod targets;
mod visited;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{RenderMemo, SearchContext, SearchStats};
pub use node::CrawlNode;
pub use search::{NavigationRequest, NavigationSearch, SearchOutcome, SearchResult, NOT_FOUND_CLICKS};
pub use state::SearchState;
pub use targets::{filter_document_targets, TargetSet, UrlCanonicalizer};
pub use visited::VisitedRegistry;
