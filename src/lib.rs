//! notion-blog: typed posts and content trees from a Notion-backed blog
//!
//! This crate fetches the rows of a Notion database and the block map of a
//! Notion page through a JSON proxy, and normalizes both into stable,
//! strongly-typed structures ready for a view layer.

pub mod client;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod state;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use client::{HttpClient, NotionApi};
use content::{ContentBlock, Post};
use state::{PageContent, PostList};

/// Name of the optional configuration file in the base directory
pub const CONFIG_FILE: &str = "notion.yml";

/// The main application handle
#[derive(Clone)]
pub struct NotionBlog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    api: Arc<dyn NotionApi>,
}

impl NotionBlog {
    /// Create an instance from a directory, reading `notion.yml` and the environment
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };
        config.apply_env();

        let api = Arc::new(HttpClient::new(&config)?);
        Ok(Self {
            config,
            base_dir,
            api,
        })
    }

    /// Create an instance around an existing API implementation
    pub fn with_api(config: config::BlogConfig, api: Arc<dyn NotionApi>) -> Self {
        Self {
            config,
            base_dir: PathBuf::from("."),
            api,
        }
    }

    /// A fresh post list state holder
    pub fn post_list(&self) -> PostList {
        PostList::new(Arc::clone(&self.api))
    }

    /// A fresh page content state holder
    pub fn page_content(&self) -> PageContent {
        PageContent::new(Arc::clone(&self.api))
    }

    /// Fetch the published posts, surfacing a failure as an error
    pub async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let list = self.post_list();
        list.fetch_posts(&self.config).await;
        let state = list.snapshot();
        match state.error {
            Some(e) => Err(e.into()),
            None => Ok(state.data),
        }
    }

    /// Fetch the content tree of a page, surfacing a failure as an error
    pub async fn fetch_page(&self, page_id: &str) -> Result<Vec<ContentBlock>> {
        let content = self.page_content();
        content.fetch_page(&self.config, page_id).await;
        let state = content.snapshot();
        match state.error {
            Some(e) => Err(e.into()),
            None => Ok(state.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, FetchError};
    use crate::state::mock::MockApi;
    use serde_json::json;

    fn make_blog(api: MockApi, database_id: &str) -> NotionBlog {
        let config = config::BlogConfig {
            database_id: database_id.to_string(),
            ..Default::default()
        };
        NotionBlog::with_api(config, Arc::new(api))
    }

    #[tokio::test]
    async fn test_fetch_posts() {
        let blog = make_blog(
            MockApi::with_table(Ok(json!([{"id": "abc-123", "Name": "Hi", "Published": "yes"}]))),
            "db",
        );
        let posts = blog.fetch_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hi");
    }

    #[tokio::test]
    async fn test_fetch_errors_keep_their_kind() {
        let blog = make_blog(MockApi::with_table(Ok(json!([]))), "");
        let err = blog.fetch_posts().await.unwrap_err();
        let err = err.downcast_ref::<FetchError>().unwrap();
        assert_eq!(err.kind(), ErrorKind::Config);

        let blog = make_blog(MockApi::with_page(Ok(json!({}))), "db");
        let err = blog.fetch_page("abc").await.unwrap_err();
        assert_eq!(err.to_string(), "Page content not found.");
    }
}
