//! Post list state holder

use serde_json::Value;
use std::sync::{Arc, Mutex};

use super::load::{lock, LoadState, LoadingGuard};
use crate::client::NotionApi;
use crate::config::BlogConfig;
use crate::content::{find_by_slug, is_published, normalize_row, Post, RawRow};
use crate::error::FetchError;

const MISSING_DATABASE: &str = "Notion database ID is not configured.";
const UNEXPECTED_PAYLOAD: &str = "Unexpected response received from Notion API proxy.";
const GENERIC_FAILURE: &str = "Unable to load blog posts.";

/// Published posts of the configured database
pub struct PostList {
    api: Arc<dyn NotionApi>,
    state: Mutex<LoadState<Vec<Post>>>,
}

impl PostList {
    pub fn new(api: Arc<dyn NotionApi>) -> Self {
        Self {
            api,
            state: Mutex::new(LoadState::default()),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> LoadState<Vec<Post>> {
        lock(&self.state).clone()
    }

    pub fn posts(&self) -> Vec<Post> {
        lock(&self.state).data.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).is_loading
    }

    pub fn error(&self) -> Option<FetchError> {
        lock(&self.state).error.clone()
    }

    /// Look up a loaded post by slug
    pub fn post_by_slug(&self, slug: &str) -> Option<Post> {
        find_by_slug(&lock(&self.state).data, slug).cloned()
    }

    /// Fetch, filter and normalize the posts of `config.database_id`
    ///
    /// Failures end up in the error slot with the post list emptied.
    pub async fn fetch_posts(&self, config: &BlogConfig) {
        let database_id = config.database_id().to_string();
        if database_id.is_empty() {
            tracing::warn!("{}", MISSING_DATABASE);
            lock(&self.state).reject(FetchError::Config(MISSING_DATABASE.to_string()));
            return;
        }

        lock(&self.state).start_loading(&database_id);
        let _guard = LoadingGuard::new(&self.state);

        tracing::info!("Fetching posts from database {}", database_id);
        let outcome = self.load(config, &database_id).await;

        let mut state = lock(&self.state);
        match outcome {
            Ok(posts) => {
                tracing::info!("Loaded {} posts", posts.len());
                state.succeed(posts);
            }
            Err(e) => {
                let e = e.or_fallback(GENERIC_FAILURE);
                tracing::warn!("Failed to load posts: {}", e);
                state.fail(e);
            }
        }
    }

    async fn load(&self, config: &BlogConfig, database_id: &str) -> Result<Vec<Post>, FetchError> {
        let payload = self
            .api
            .fetch_table(&config.api_base_url(), database_id)
            .await?;
        normalize_table(&payload, &config.post_base_url())
    }
}

/// Turn a table payload into the published posts it contains
pub fn normalize_table(payload: &Value, post_base_url: &str) -> Result<Vec<Post>, FetchError> {
    let rows = payload
        .as_array()
        .ok_or_else(|| FetchError::Shape(UNEXPECTED_PAYLOAD.to_string()))?;

    let posts = rows
        .iter()
        .filter_map(|value| match RawRow::decode(value) {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::debug!("Skipping row: {}", e);
                None
            }
        })
        .filter(is_published)
        .map(|row| normalize_row(&row, post_base_url))
        .collect();

    Ok(posts)
}
