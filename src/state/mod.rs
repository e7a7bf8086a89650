//! State holders driving the fetch → normalize → store pipeline
//!
//! Each holder owns one [`LoadState`] and mutates it only through its
//! own fetch/reset operations. Readers take snapshots.

mod load;
mod page;
mod posts;

pub use load::LoadState;
pub use page::{normalize_page, PageContent};
pub use posts::{normalize_table, PostList};

#[cfg(test)]
pub(crate) mod mock {
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    use crate::client::NotionApi;
    use crate::error::FetchError;

    type Reply = Result<Value, FetchError>;

    /// Canned [`NotionApi`] recording how it was called
    pub struct MockApi {
        table: Mutex<Reply>,
        page: Mutex<Reply>,
        table_calls: AtomicUsize,
        page_calls: AtomicUsize,
        last_table: Mutex<Option<(String, String)>>,
        last_page: Mutex<Option<(String, String)>>,
        gate: Option<Arc<Notify>>,
    }

    impl MockApi {
        fn new(table: Reply, page: Reply) -> Self {
            Self {
                table: Mutex::new(table),
                page: Mutex::new(page),
                table_calls: AtomicUsize::new(0),
                page_calls: AtomicUsize::new(0),
                last_table: Mutex::new(None),
                last_page: Mutex::new(None),
                gate: None,
            }
        }

        pub fn with_table(reply: Reply) -> Self {
            Self::new(reply, Ok(Value::Null))
        }

        pub fn with_page(reply: Reply) -> Self {
            Self::new(Ok(Value::Null), reply)
        }

        /// Hold every response until the gate is notified
        pub fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        pub fn set_table(&self, reply: Reply) {
            *self.table.lock().unwrap() = reply;
        }

        pub fn table_calls(&self) -> usize {
            self.table_calls.load(Ordering::SeqCst)
        }

        pub fn page_calls(&self) -> usize {
            self.page_calls.load(Ordering::SeqCst)
        }

        pub fn last_table_request(&self) -> Option<(String, String)> {
            self.last_table.lock().unwrap().clone()
        }

        pub fn last_page_request(&self) -> Option<(String, String)> {
            self.last_page.lock().unwrap().clone()
        }

        async fn wait(&self) {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
        }
    }

    #[async_trait]
    impl NotionApi for MockApi {
        async fn fetch_table(&self, api_base_url: &str, database_id: &str) -> Reply {
            self.table_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_table.lock().unwrap() =
                Some((api_base_url.to_string(), database_id.to_string()));
            self.wait().await;
            self.table.lock().unwrap().clone()
        }

        async fn fetch_page(&self, api_base_url: &str, page_id: &str) -> Reply {
            self.page_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_page.lock().unwrap() =
                Some((api_base_url.to_string(), page_id.to_string()));
            self.wait().await;
            self.page.lock().unwrap().clone()
        }
    }
}
