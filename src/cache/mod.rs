//! Message Cache Module
//!
//! Process-wide holder of the in-memory corpus used by the substring backend.
//!
//! ## Lifecycle
//! `Empty → Loading → Ready` on a successful startup load, or `Loading → Failed`
//! when ingestion aborts. A `Ready` cache never changes again: there is no TTL
//! and no refresh.
//!
//! The cache is an owned component passed around as `Arc<MessageCache>`, so
//! tests can construct one directly in the `Ready` state.

pub mod snapshot;

pub use snapshot::{CacheState, MessageCache, Snapshot};

#[cfg(test)]
mod tests;
