use super::engine::{find_in_snapshot, SearchBackend};
use super::error::SearchError;
use super::pagination::PageRequest;
use super::types::{BackendStatus, MatchPage};
use crate::cache::MessageCache;

use async_trait::async_trait;
use std::sync::Arc;

/// In-memory backend: case-insensitive substring match over the cached
/// snapshot, in upstream order.
pub struct SubstringSearch {
    cache: Arc<MessageCache>,
}

impl SubstringSearch {
    pub fn new(cache: Arc<MessageCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl SearchBackend for SubstringSearch {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn status(&self) -> Result<BackendStatus, SearchError> {
        Ok(BackendStatus {
            ready: self.cache.is_ready(),
            messages: self.cache.len(),
        })
    }

    async fn find(&self, query: &str, page: PageRequest) -> Result<MatchPage, SearchError> {
        let snapshot = self.cache.snapshot().ok_or(SearchError::NotReady)?;
        find_in_snapshot(&snapshot, query, page)
    }
}
