use crate::search::types::Message;

use arc_swap::ArcSwap;
use std::sync::Arc;

/// Immutable, shareable view of the loaded corpus.
pub type Snapshot = Arc<[Message]>;

/// Lifecycle of the cache. Only `Ready` carries data.
#[derive(Debug, Clone)]
pub enum CacheState {
    Empty,
    Loading,
    Ready(Snapshot),
    Failed(String),
}

/// Holder of the current snapshot.
///
/// The state sits behind an [`ArcSwap`]: readers take a lock-free load and
/// the loader replaces the whole state in one pointer swap, so a reader sees
/// either no data or the whole corpus.
pub struct MessageCache {
    state: ArcSwap<CacheState>,
}

impl MessageCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Builds a cache that is already `Ready`. Mostly useful in tests.
    pub fn with_messages(messages: Vec<Message>) -> Arc<Self> {
        let cache = Self::default();
        cache.publish(messages);
        Arc::new(cache)
    }

    /// `Empty`/`Failed` → `Loading`. A ready snapshot is never discarded.
    pub fn begin_loading(&self) {
        self.state.rcu(|current| match current.as_ref() {
            CacheState::Empty | CacheState::Failed(_) => Arc::new(CacheState::Loading),
            _ => Arc::clone(current),
        });
    }

    /// Publishes the complete snapshot in a single swap.
    pub fn publish(&self, messages: Vec<Message>) {
        let snapshot: Snapshot = messages.into();
        let count = snapshot.len();
        self.state.store(Arc::new(CacheState::Ready(snapshot)));
        tracing::info!("Published snapshot with {} messages", count);
    }

    pub fn mark_failed(&self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!("Cache load failed: {}", reason);
        self.state.store(Arc::new(CacheState::Failed(reason)));
    }

    pub fn is_ready(&self) -> bool {
        matches!(**self.state.load(), CacheState::Ready(_))
    }

    /// Returns the published snapshot, or an empty one before load completes.
    pub fn read(&self) -> Snapshot {
        self.snapshot().unwrap_or_else(|| Arc::from(Vec::new()))
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        match &**self.state.load() {
            CacheState::Ready(snapshot) => Some(Arc::clone(snapshot)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match &**self.state.load() {
            CacheState::Ready(snapshot) => snapshot.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn state(&self) -> CacheState {
        (**self.state.load()).clone()
    }
}

impl Default for MessageCache {
    fn default() -> Self {
        Self {
            state: ArcSwap::from_pointee(CacheState::Empty),
        }
    }
}
