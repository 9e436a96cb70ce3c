use std::collections::HashSet;

/// Every URL rendered or reserved for rendering during one computation
///
/// A URL enters the registry once, either as the root or when a parent page
/// first discovers it as a child. Nothing already registered is ever turned
/// into a new node, which bounds the search and breaks link cycles.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    urls: HashSet<String>,
}

impl VisitedRegistry {
    /// Creates a registry seeded with the root URL
    pub fn with_root(root_url: &str) -> Self {
        let mut registry = Self::default();
        registry.register(root_url);
        registry
    }

    /// Reserves a URL; returns false if it was already present
    pub fn register(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_registered() {
        let registry = VisitedRegistry::with_root("https://a.edu");
        assert!(registry.contains("https://a.edu"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_once() {
        let mut registry = VisitedRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.register("https://a.edu/x"));
        assert!(!registry.register("https://a.edu/x"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_exact_string_identity() {
        let mut registry = VisitedRegistry::with_root("https://a.edu");
        assert!(registry.register("https://a.edu/"));
        assert!(registry.register("http://a.edu"));
        assert_eq!(registry.len(), 3);
    }
}
