//! Page content state holder

use serde_json::Value;
use std::sync::{Arc, Mutex};

use super::load::{lock, LoadState, LoadingGuard};
use crate::client::NotionApi;
use crate::config::BlogConfig;
use crate::content::{normalize_children, BlockMap, ContentBlock};
use crate::error::FetchError;
use crate::helpers::strip_notion_id;

const INVALID_PAGE_ID: &str = "Invalid Notion page ID.";
const PAGE_NOT_FOUND: &str = "Page content not found.";
const GENERIC_FAILURE: &str = "Unable to load page content.";

/// Content tree of one page at a time
pub struct PageContent {
    api: Arc<dyn NotionApi>,
    state: Mutex<LoadState<Vec<ContentBlock>>>,
}

impl PageContent {
    pub fn new(api: Arc<dyn NotionApi>) -> Self {
        Self {
            api,
            state: Mutex::new(LoadState::default()),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> LoadState<Vec<ContentBlock>> {
        lock(&self.state).clone()
    }

    pub fn blocks(&self) -> Vec<ContentBlock> {
        lock(&self.state).data.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).is_loading
    }

    pub fn error(&self) -> Option<FetchError> {
        lock(&self.state).error.clone()
    }

    /// Separator-free id of the page last requested
    pub fn current_page_id(&self) -> Option<String> {
        lock(&self.state).current.clone()
    }

    /// Fetch and normalize the content of `page_id`
    ///
    /// A call for the page that is already loading returns immediately.
    /// Failures end up in the error slot with the block list emptied.
    pub async fn fetch_page(&self, config: &BlogConfig, page_id: &str) {
        let page_id = strip_notion_id(page_id);
        {
            let mut state = lock(&self.state);
            if page_id.is_empty() {
                tracing::warn!("{}", INVALID_PAGE_ID);
                state.reject(FetchError::Config(INVALID_PAGE_ID.to_string()));
                return;
            }
            if state.is_loading_for(&page_id) {
                tracing::debug!("Page {} is already loading", page_id);
                return;
            }
            state.start_loading(&page_id);
        }
        let _guard = LoadingGuard::new(&self.state);

        tracing::info!("Fetching page {}", page_id);
        let outcome = self.load(config, &page_id).await;

        let mut state = lock(&self.state);
        match outcome {
            Ok(blocks) => {
                tracing::info!("Loaded {} top-level blocks for page {}", blocks.len(), page_id);
                state.succeed(blocks);
            }
            Err(e) => {
                let e = e.or_fallback(GENERIC_FAILURE);
                tracing::warn!("Failed to load page {}: {}", page_id, e);
                state.fail(e);
            }
        }
    }

    /// Forget the loaded page
    pub fn reset(&self) {
        lock(&self.state).reset();
    }

    async fn load(&self, config: &BlogConfig, page_id: &str) -> Result<Vec<ContentBlock>, FetchError> {
        let payload = self.api.fetch_page(&config.api_base_url(), page_id).await?;
        normalize_page(&payload)
    }
}

/// Turn a page payload into the content blocks under its root
pub fn normalize_page(payload: &Value) -> Result<Vec<ContentBlock>, FetchError> {
    let map = BlockMap::decode(payload).map_err(|e| FetchError::Shape(e.to_string()))?;

    let (root_id, root) = map
        .page_root()
        .ok_or_else(|| FetchError::Shape(PAGE_NOT_FOUND.to_string()))?;
    let children = root
        .content
        .as_deref()
        .ok_or_else(|| FetchError::Shape(PAGE_NOT_FOUND.to_string()))?;

    tracing::debug!("Page root {} has {} children", root_id, children.len());
    normalize_children(children, &map).map_err(|e| FetchError::Shape(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BlockType;
    use crate::error::ErrorKind;
    use crate::state::mock::MockApi;
    use serde_json::json;
    use tokio::sync::Notify;

    fn page_payload() -> Value {
        json!({
            "root-1": {"role": "reader", "value": {"type": "page", "content": ["b1", "b2", "missing"]}},
            "b1": {"role": "reader", "value": {"type": "header", "properties": {"title": [["Intro"]]}}},
            "b2": {"role": "reader", "value": {"type": "bulleted_list", "properties": {"title": [["Point"]]}, "content": ["b3"]}},
            "b3": {"role": "reader", "value": {"type": "text", "properties": {"title": [["Detail"]]}}}
        })
    }

    #[test]
    fn test_normalize_page() {
        let blocks = normalize_page(&page_payload()).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].block_type, BlockType::Heading1);
        assert_eq!(blocks[1].children[0].text.as_deref(), Some("Detail"));
        assert_eq!(blocks[1].depth(), 2);
    }

    #[test]
    fn test_normalize_page_without_root() {
        let err = normalize_page(&json!({
            "b1": {"value": {"type": "text"}}
        }))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert_eq!(err.to_string(), PAGE_NOT_FOUND);

        let err = normalize_page(&json!({"p": {"value": {"type": "page"}}})).unwrap_err();
        assert_eq!(err.to_string(), PAGE_NOT_FOUND);

        let err = normalize_page(&json!(["not", "a", "map"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_normalize_page_cycle() {
        let err = normalize_page(&json!({
            "p": {"value": {"type": "page", "content": ["a"]}},
            "a": {"value": {"type": "text", "content": ["a"]}}
        }))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[tokio::test]
    async fn test_fetch_page_success() {
        let api = Arc::new(MockApi::with_page(Ok(page_payload())));
        let content = PageContent::new(api.clone());

        content.fetch_page(&BlogConfig::default(), "abc-123").await;

        let state = content.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(state.data.len(), 2);
        assert_eq!(content.current_page_id().as_deref(), Some("abc123"));
        assert_eq!(
            api.last_page_request(),
            Some(("https://notion-api.splitbee.io".to_string(), "abc123".to_string()))
        );
    }

    #[tokio::test]
    async fn test_fetch_page_without_root() {
        let api = Arc::new(MockApi::with_page(Ok(json!({
            "b1": {"value": {"type": "text"}}
        }))));
        let content = PageContent::new(api);

        content.fetch_page(&BlogConfig::default(), "abc").await;

        assert!(content.blocks().is_empty());
        assert!(!content.is_loading());
        assert_eq!(
            content.error().map(|e| e.to_string()).as_deref(),
            Some(PAGE_NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn test_fetch_page_invalid_id() {
        let api = Arc::new(MockApi::with_page(Ok(page_payload())));
        let content = PageContent::new(api.clone());

        content.fetch_page(&BlogConfig::default(), " - ").await;

        assert_eq!(content.error().map(|e| e.kind()), Some(ErrorKind::Config));
        assert_eq!(api.page_calls(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_fetch_is_ignored() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(MockApi::with_page(Ok(page_payload())).gated(gate.clone()));
        let content = PageContent::new(api.clone());
        let config = BlogConfig::default();

        let first = content.fetch_page(&config, "abc-123");
        let second = async {
            // Let the first fetch reach the gate before re-entering
            while !content.is_loading() {
                tokio::task::yield_now().await;
            }
            content.fetch_page(&config, "abc123").await;
            assert!(content.is_loading());
            gate.notify_one();
        };
        tokio::join!(first, second);

        assert_eq!(api.page_calls(), 1);
        assert!(!content.is_loading());
        assert_eq!(content.blocks().len(), 2);
    }

    #[tokio::test]
    async fn test_reset() {
        let api = Arc::new(MockApi::with_page(Ok(page_payload())));
        let content = PageContent::new(api);
        content.fetch_page(&BlogConfig::default(), "abc").await;
        assert!(!content.blocks().is_empty());

        content.reset();

        let state = content.snapshot();
        assert!(state.data.is_empty());
        assert_eq!(state.error, None);
        assert_eq!(state.current, None);
    }
}
