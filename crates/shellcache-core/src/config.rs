//! Worker configuration.
//!
//! This module holds the static configuration surface of the interceptor:
//! the bucket name encoding the deployment version, the origin the worker
//! serves, the ordered core resource list (the application shell), the
//! always-fresh URL patterns routed network-first, and the shell entry used
//! as an offline navigation fallback.
//!
//! Changing the bucket name or the core list constitutes a new version and
//! triggers the install/activate cycle on next load. Nothing here is
//! mutated at runtime.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Shell entry returned to offline navigation requests.
pub const DEFAULT_SHELL_FALLBACK: &str = "./index.html";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Cache bucket name; encodes the version identifier. Only this bucket
    /// is authoritative, all others are stale garbage.
    pub bucket_name: String,

    /// Origin the worker is registered on. Relative core entries are
    /// resolved against it.
    pub origin: Url,

    /// Ordered core resource list: the minimum set of URLs needed to render
    /// the application shell offline. Entries may be relative to the origin
    /// or absolute CDN URLs.
    pub core_resources: Vec<String>,

    /// Substring patterns for URLs that must never serve stale (third-party
    /// SDK scripts). Matching requests are routed network-first.
    pub always_fresh: Vec<String>,

    /// Core entry served as fallback when a navigation fails offline.
    pub shell_fallback: String,
}

impl WorkerConfig {
    pub fn new(bucket_name: impl Into<String>, origin: Url) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            origin,
            core_resources: Vec::new(),
            always_fresh: Vec::new(),
            shell_fallback: DEFAULT_SHELL_FALLBACK.to_string(),
        }
    }

    pub fn with_core_resources<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.core_resources = entries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_always_fresh<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.always_fresh = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_shell_fallback(mut self, entry: impl Into<String>) -> Self {
        self.shell_fallback = entry.into();
        self
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Resolve a core list entry against the origin. Absolute entries pass
    /// through unchanged.
    pub fn resolve(&self, entry: &str) -> std::result::Result<Url, url::ParseError> {
        self.origin.join(entry)
    }

    /// Resolved URL of the shell fallback entry.
    pub fn shell_url(&self) -> std::result::Result<Url, url::ParseError> {
        self.resolve(&self.shell_fallback)
    }

    /// The origin's root path URL as a string.
    pub fn origin_root(&self) -> String {
        self.origin
            .join("/")
            .map(|u| u.to_string())
            .unwrap_or_else(|_| self.origin.to_string())
    }

    /// Whether a URL matches an always-fresh pattern (substring test).
    pub fn is_always_fresh(&self, url: &Url) -> bool {
        let url = url.as_str();
        self.always_fresh.iter().any(|pattern| url.contains(pattern))
    }

    /// Whether a fetched URL should be written back into the bucket.
    ///
    /// Core entries are compared as raw string prefixes of the full request
    /// URL, so relative entries never match here (they are cached during
    /// provisioning instead) and an absolute entry also matches unrelated
    /// URLs sharing its prefix. The origin's root path is always core.
    pub fn is_core_asset(&self, url: &Url) -> bool {
        let url = url.as_str();
        self.core_resources
            .iter()
            .any(|entry| url.starts_with(entry.as_str()))
            || url == self.origin_root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WorkerConfig {
        WorkerConfig::new(
            "app-cache-v1",
            Url::parse("https://app.example/").unwrap(),
        )
        .with_core_resources([
            "./index.html",
            "./",
            "https://cdn.example/lib.js",
        ])
        .with_always_fresh(["firebase"])
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let config = config();
        assert_eq!(
            config.resolve("./index.html").unwrap().as_str(),
            "https://app.example/index.html"
        );
        assert_eq!(config.resolve("./").unwrap().as_str(), "https://app.example/");
        assert_eq!(
            config.resolve("https://cdn.example/lib.js").unwrap().as_str(),
            "https://cdn.example/lib.js"
        );
    }

    #[test]
    fn test_always_fresh_is_substring_match() {
        let config = config();
        let sdk = Url::parse("https://sdk.example/firebase-init.js").unwrap();
        let app = Url::parse("https://app.example/app.js").unwrap();
        assert!(config.is_always_fresh(&sdk));
        assert!(!config.is_always_fresh(&app));
    }

    #[test]
    fn test_core_asset_absolute_prefix() {
        let config = config();
        let exact = Url::parse("https://cdn.example/lib.js").unwrap();
        let versioned = Url::parse("https://cdn.example/lib.js?v=3").unwrap();
        let other = Url::parse("https://cdn.example/other.js").unwrap();
        assert!(config.is_core_asset(&exact));
        assert!(config.is_core_asset(&versioned));
        assert!(!config.is_core_asset(&other));
    }

    // Raw prefix matching over-matches unrelated URLs sharing a prefix.
    // That behavior is intentional and pinned here.
    #[test]
    fn test_core_asset_prefix_over_match() {
        let config = config();
        let sibling = Url::parse("https://cdn.example/lib.js2").unwrap();
        assert!(config.is_core_asset(&sibling));
    }

    #[test]
    fn test_relative_entries_do_not_match_at_runtime() {
        let config = config();
        // "./index.html" is in the core list, but raw prefix comparison
        // against an absolute URL never matches a relative entry.
        let index = Url::parse("https://app.example/index.html").unwrap();
        assert!(!config.is_core_asset(&index));
    }

    #[test]
    fn test_origin_root_is_core() {
        let config = config();
        let root = Url::parse("https://app.example/").unwrap();
        let page = Url::parse("https://app.example/dashboard").unwrap();
        assert!(config.is_core_asset(&root));
        assert!(!config.is_core_asset(&page));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worker.json");

        let config = config();
        config.save(&path).unwrap();

        let loaded = WorkerConfig::load(&path).unwrap();
        assert_eq!(loaded.bucket_name, config.bucket_name);
        assert_eq!(loaded.origin, config.origin);
        assert_eq!(loaded.core_resources, config.core_resources);
        assert_eq!(loaded.always_fresh, config.always_fresh);
        assert_eq!(loaded.shell_fallback, DEFAULT_SHELL_FALLBACK);
    }
}
