//! Access to the Notion API proxy
//!
//! State holders depend on the [`NotionApi`] trait only; [`HttpClient`] is
//! the reqwest-backed implementation used by the binary.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::config::BlogConfig;
use crate::error::FetchError;
use crate::helpers::{page_url, table_url};

/// Raw JSON retrieval from the proxy
#[async_trait]
pub trait NotionApi: Send + Sync {
    /// `GET {base}/v1/table/{database_id}`
    async fn fetch_table(&self, api_base_url: &str, database_id: &str)
        -> Result<Value, FetchError>;

    /// `GET {base}/v1/page/{page_id}`
    async fn fetch_page(&self, api_base_url: &str, page_id: &str) -> Result<Value, FetchError>;
}

/// reqwest-based [`NotionApi`]
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Build a client honouring the configured timeout
    pub fn new(config: &BlogConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("notion-blog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Unknown(e.to_string()))?;
        Ok(Self { client })
    }

    async fn get_json(&self, url: &str, resource: &'static str) -> Result<Value, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        serde_json::from_slice(&body)
            .map_err(|e| FetchError::Shape(format!("Response body is not valid JSON: {}", e)))
    }
}

#[async_trait]
impl NotionApi for HttpClient {
    async fn fetch_table(
        &self,
        api_base_url: &str,
        database_id: &str,
    ) -> Result<Value, FetchError> {
        self.get_json(&table_url(api_base_url, database_id), "posts")
            .await
    }

    async fn fetch_page(&self, api_base_url: &str, page_id: &str) -> Result<Value, FetchError> {
        self.get_json(&page_url(api_base_url, page_id), "page content")
            .await
    }
}
