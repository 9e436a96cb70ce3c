use crate::config::types::{Config, NavigationConfig, RendererConfig, SiteEntry, UserAgentConfig};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

const MAX_LEVEL_THRESHOLD: u32 = 10;
const MAX_CONCURRENT_RENDERS: usize = 64;
const MAX_PAGE_LOAD_TIMEOUT: u64 = 600;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_navigation_config(&config.navigation)?;
    validate_renderer_config(&config.renderer)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_sites(&config.sites)?;
    Ok(())
}

/// Validates navigation search configuration
fn validate_navigation_config(config: &NavigationConfig) -> Result<(), ConfigError> {
    if config.level_threshold < 1 || config.level_threshold > MAX_LEVEL_THRESHOLD {
        return Err(ConfigError::Validation(format!(
            "level_threshold must be between 1 and {}, got {}",
            MAX_LEVEL_THRESHOLD, config.level_threshold
        )));
    }

    if config.max_concurrent_renders < 1 || config.max_concurrent_renders > MAX_CONCURRENT_RENDERS
    {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_renders must be between 1 and {}, got {}",
            MAX_CONCURRENT_RENDERS, config.max_concurrent_renders
        )));
    }

    Ok(())
}

/// Validates render client configuration
fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    if config.page_load_timeout < 1 || config.page_load_timeout > MAX_PAGE_LOAD_TIMEOUT {
        return Err(ConfigError::Validation(format!(
            "page_load_timeout must be between 1 and {}s, got {}s",
            MAX_PAGE_LOAD_TIMEOUT, config.page_load_timeout
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates the list of sites to measure
fn validate_sites(sites: &[SiteEntry]) -> Result<(), ConfigError> {
    let mut names = HashSet::new();

    for site in sites {
        if site.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site name cannot be empty".to_string(),
            ));
        }

        if !names.insert(site.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate site name '{}'",
                site.name
            )));
        }

        validate_http_url(&site.root, "root", &site.name)?;

        for target in &site.targets {
            validate_http_url(target, "target", &site.name)?;
        }
    }

    Ok(())
}

/// Requires an absolute http(s) URL
fn validate_http_url(candidate: &str, role: &str, site: &str) -> Result<(), ConfigError> {
    let url = Url::parse(candidate).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid {} URL '{}' for site '{}': {}",
            role, candidate, site, e
        ))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} URL '{}' for site '{}' must use http or https",
            role, candidate, site
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(name: &str, root: &str, targets: &[&str]) -> SiteEntry {
        SiteEntry {
            name: name.to_string(),
            root: root.to_string(),
            targets: targets.iter().map(|t| t.to_string()).collect(),
            link_count: None,
        }
    }

    #[test]
    fn test_validate_navigation_bounds() {
        let mut config = NavigationConfig::default();
        assert!(validate_navigation_config(&config).is_ok());

        config.level_threshold = 0;
        assert!(validate_navigation_config(&config).is_err());

        config.level_threshold = MAX_LEVEL_THRESHOLD + 1;
        assert!(validate_navigation_config(&config).is_err());

        config.level_threshold = 2;
        config.max_concurrent_renders = 0;
        assert!(validate_navigation_config(&config).is_err());
    }

    #[test]
    fn test_validate_renderer_timeout() {
        let mut config = RendererConfig::default();
        assert!(validate_renderer_config(&config).is_ok());

        config.page_load_timeout = 0;
        assert!(validate_renderer_config(&config).is_err());
    }

    #[test]
    fn test_validate_sites() {
        assert!(validate_sites(&[site(
            "A",
            "https://a.example.edu",
            &["http://a.example.edu/page"]
        )])
        .is_ok());

        assert!(validate_sites(&[site("", "https://a.example.edu", &[])]).is_err());
        assert!(validate_sites(&[site("A", "not a url", &[])]).is_err());
        assert!(validate_sites(&[site("A", "ftp://a.example.edu", &[])]).is_err());
        assert!(validate_sites(&[site("A", "https://a.example.edu", &["nope"])]).is_err());
    }

    #[test]
    fn test_duplicate_site_names_rejected() {
        let sites = vec![
            site("A", "https://a.example.edu", &[]),
            site("A", "https://b.example.edu", &[]),
        ];
        let err = validate_sites(&sites).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
    }
}
