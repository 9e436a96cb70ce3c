use serde::Deserialize;

/// Depth bound used when the configuration does not set one
pub const DEFAULT_LEVEL_THRESHOLD: u32 = 5;

/// Main configuration structure for Click-Distance
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default, rename = "site")]
    pub sites: Vec<SiteEntry>,
}

/// Navigation search behavior
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationConfig {
    /// Deepest level (in clicks from the root) the search will build
    #[serde(rename = "level-threshold", default = "default_level_threshold")]
    pub level_threshold: u32,

    /// Maximum number of page renders in flight within one level
    #[serde(rename = "max-concurrent-renders", default = "default_concurrent_renders")]
    pub max_concurrent_renders: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            level_threshold: default_level_threshold(),
            max_concurrent_renders: default_concurrent_renders(),
        }
    }
}

/// Which page render client to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Plain HTTP fetch and static HTML link extraction
    Http,
    /// Chrome-rendered DOM, including client-side scripts
    Headless,
}

/// Page render client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    #[serde(default = "default_mode")]
    pub mode: RenderMode,

    /// Run the browser without a window (headless mode only)
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Per-page load timeout (seconds)
    #[serde(rename = "page-load-timeout", default = "default_page_load_timeout")]
    pub page_load_timeout: u64,

    /// Extra wait after navigation for scripts to settle (milliseconds)
    #[serde(rename = "settle-delay", default)]
    pub settle_delay: u64,

    /// Consult robots.txt before fetching (http mode only)
    #[serde(rename = "respect-robots", default)]
    pub respect_robots: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            headless: true,
            page_load_timeout: default_page_load_timeout(),
            settle_delay: 0,
            respect_robots: false,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the user agent header: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// One site whose navigation difficulty should be measured
#[derive(Debug, Clone, Deserialize)]
pub struct SiteEntry {
    /// Display name (e.g., the university name)
    pub name: String,

    /// Homepage the search starts from
    pub root: String,

    /// Pages already known to hold relevant content
    #[serde(default)]
    pub targets: Vec<String>,

    /// Number of relevant pages found upstream; zero skips the site
    #[serde(rename = "link-count", default)]
    pub link_count: Option<u32>,
}

impl SiteEntry {
    /// Upstream link count, falling back to the number of listed targets
    pub fn effective_link_count(&self) -> u32 {
        self.link_count
            .unwrap_or_else(|| u32::try_from(self.targets.len()).unwrap_or(u32::MAX))
    }
}

fn default_level_threshold() -> u32 {
    DEFAULT_LEVEL_THRESHOLD
}

fn default_concurrent_renders() -> usize {
    1
}

fn default_mode() -> RenderMode {
    RenderMode::Http
}

fn default_true() -> bool {
    true
}

fn default_page_load_timeout() -> u64 {
    60
}
