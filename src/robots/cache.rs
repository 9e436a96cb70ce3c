//! Robots.txt caching implementation
//!
//! Entries are keyed by origin and expire after 24 hours.

use crate::robots::{fetch_robots, ParsedRobots};
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// Cached robots.txt data for one origin
#[derive(Debug, Clone)]
pub struct CachedRobots {
    /// The parsed robots.txt content
    pub content: ParsedRobots,

    /// When the robots.txt was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CachedRobots {
    /// Creates a new CachedRobots stamped with the current time
    pub fn new(content: ParsedRobots) -> Self {
        Self {
            content,
            fetched_at: Utc::now(),
        }
    }

    /// Checks if the cached robots.txt is older than 24 hours
    pub fn is_stale(&self) -> bool {
        Utc::now() - self.fetched_at > Duration::hours(24)
    }

    /// Checks if a URL is allowed according to the cached robots.txt
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        self.content.is_allowed(url, user_agent)
    }
}

/// Per-origin robots.txt cache shared by all renders of one renderer
#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: Mutex<HashMap<String, CachedRobots>>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks `url` against its origin's robots.txt, fetching it when missing or stale
    pub async fn is_allowed(&self, client: &Client, url: &Url, user_agent: &str) -> bool {
        let origin = url.origin().ascii_serialization();

        if let Some(cached) = self.lookup(&origin) {
            return cached.is_allowed(url.as_str(), user_agent);
        }

        let cached = CachedRobots::new(fetch_robots(client, url).await);
        let allowed = cached.is_allowed(url.as_str(), user_agent);
        self.store(origin, cached);
        allowed
    }

    /// Number of origins currently cached
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, origin: &str) -> Option<CachedRobots> {
        self.lock()
            .get(origin)
            .filter(|cached| !cached.is_stale())
            .cloned()
    }

    fn store(&self, origin: String, cached: CachedRobots) {
        self.lock().insert(origin, cached);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CachedRobots>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
