//! Robots.txt handling module
//!
//! Optional politeness for the HTTP renderer: fetch, parse, and cache
//! robots.txt per origin, and refuse to render disallowed pages.

mod cache;
mod parser;

pub use cache::{CachedRobots, RobotsCache};
pub use parser::ParsedRobots;

use reqwest::Client;
use url::Url;

/// Fetches robots.txt for the origin of `url`
///
/// A missing, unreadable, or non-2xx robots.txt is treated as "allow all",
/// so robots handling can only ever narrow a search, never fail it.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - Any URL on the origin whose robots.txt should be fetched
pub async fn fetch_robots(client: &Client, url: &Url) -> ParsedRobots {
    let robots_url = match url.join("/robots.txt") {
        Ok(u) => u,
        Err(e) => {
            tracing::debug!("Cannot build robots.txt URL for {}: {}", url, e);
            return ParsedRobots::allow_all();
        }
    };

    tracing::debug!("Fetching {}", robots_url);

    let response = match client.get(robots_url.as_str()).send().await {
        Ok(r) if r.status().is_success() => r,
        Ok(r) => {
            tracing::debug!("robots.txt at {} returned {}", robots_url, r.status());
            return ParsedRobots::allow_all();
        }
        Err(e) => {
            tracing::debug!("Failed to fetch {}: {}", robots_url, e);
            return ParsedRobots::allow_all();
        }
    };

    match response.text().await {
        Ok(body) => ParsedRobots::from_content(&body),
        Err(e) => {
            tracing::debug!("Failed to read {}: {}", robots_url, e);
            ParsedRobots::allow_all()
        }
    }
}
