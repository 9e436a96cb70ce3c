//! Click-Distance: a navigation difficulty meter for websites
//!
//! Given a site's root page and a set of pages already known to hold relevant
//! content, this crate finds the minimum number of on-site hyperlink clicks
//! needed to reach any of those pages, together with the path that got there.

pub mod config;
pub mod navigation;
pub mod output;
pub mod render;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for Click-Distance operations
#[derive(Debug, Error)]
pub enum NavError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Errors raised while rendering a single page
///
/// None of these abort a navigation computation; a failed render degrades the
/// affected node to "no children, not a hit".
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Render timeout for {url}")]
    Timeout { url: String },

    #[error("Browser error for {url}: {message}")]
    Browser { url: String, message: String },

    #[error("URL disallowed by robots.txt: {url}")]
    RobotsDenied { url: String },

    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Render task failed: {0}")]
    TaskJoin(String),
}

/// Result type alias for Click-Distance operations
pub type Result<T> = std::result::Result<T, NavError>;

// Re-export commonly used types
pub use config::Config;
pub use navigation::{
    NavigationRequest, NavigationSearch, SearchOutcome, SearchResult, SearchStats,
    NOT_FOUND_CLICKS,
};
pub use render::{PageRenderer, RenderedPage};
