//! Configuration module for Click-Distance
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use click_distance::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("click-distance.toml")).unwrap();
//! println!("Level threshold: {}", config.navigation.level_threshold);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, NavigationConfig, RenderMode, RendererConfig, SiteEntry, UserAgentConfig,
    DEFAULT_LEVEL_THRESHOLD,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
