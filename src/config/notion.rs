//! Blog configuration (notion.yml + environment)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::helpers::sanitize_base_url;

/// Public proxy used when no API base URL is configured
pub const DEFAULT_API_BASE_URL: &str = "https://notion-api.splitbee.io";

/// Environment variable overriding `api_base_url`
pub const ENV_API_BASE_URL: &str = "NOTION_API_BASE_URL";
/// Environment variable overriding `database_id`
pub const ENV_DATABASE_ID: &str = "NOTION_BLOG_DATABASE_ID";
/// Environment variable overriding `post_base_url`
pub const ENV_POST_BASE_URL: &str = "NOTION_POST_BASE_URL";

/// Settings consumed by every fetch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BlogConfig {
    /// Base URL of the Notion API proxy
    pub api_base_url: String,

    /// Database holding the blog posts
    pub database_id: String,

    /// Site prefix used to build canonical post links
    pub post_base_url: String,

    /// HTTP request timeout
    pub request_timeout_secs: u64,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            database_id: String::new(),
            post_base_url: String::new(),
            request_timeout_secs: 30,
        }
    }
}

impl BlogConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Overlay values from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary lookup; blank values are ignored
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = get(ENV_API_BASE_URL) {
            self.api_base_url = v;
        }
        if let Some(v) = get(ENV_DATABASE_ID) {
            self.database_id = v;
        }
        if let Some(v) = get(ENV_POST_BASE_URL) {
            self.post_base_url = v;
        }
    }

    /// API base URL without trailing slashes, or the public default
    pub fn api_base_url(&self) -> String {
        let base = sanitize_base_url(&self.api_base_url);
        if base.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            base
        }
    }

    /// Trimmed database id; empty when not configured
    pub fn database_id(&self) -> &str {
        self.database_id.trim()
    }

    /// Post base URL without trailing slashes; empty when not configured
    pub fn post_base_url(&self) -> String {
        sanitize_base_url(&self.post_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = BlogConfig::default();
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.database_id(), "");
        assert_eq!(config.post_base_url(), "");
    }

    #[test]
    fn test_blank_api_base_falls_back() {
        let config = BlogConfig {
            api_base_url: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_apply_env() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_BASE_URL, "https://proxy.example.com/"),
            (ENV_DATABASE_ID, "  db-1  "),
            (ENV_POST_BASE_URL, ""),
        ]
        .into_iter()
        .collect();

        let mut config = BlogConfig {
            post_base_url: "https://blog.example.com".to_string(),
            ..Default::default()
        };
        config.apply_env_with(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_base_url(), "https://proxy.example.com");
        assert_eq!(config.database_id(), "db-1");
        assert_eq!(config.post_base_url(), "https://blog.example.com");
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notion.yml");
        fs::write(
            &path,
            "database_id: abc-123\npost_base_url: https://blog.example.com/posts/\n",
        )
        .unwrap();

        let config = BlogConfig::load(&path).unwrap();
        assert_eq!(config.database_id(), "abc-123");
        assert_eq!(config.post_base_url(), "https://blog.example.com/posts");
        assert_eq!(config.request_timeout_secs, 30);
    }
}
