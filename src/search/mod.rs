//! Search Service Module
//!
//! Executes user queries against the message corpus and serves the results
//! over HTTP.
//!
//! ## Backends
//! The engine is polymorphic over one capability, [`engine::SearchBackend`],
//! with two implementations selected at startup:
//! - **`memory`**: case-insensitive substring match over the cached snapshot,
//!   results in upstream order.
//! - **`sqlite`**: stemmed full-text match on SQLite FTS5, ranked by `bm25`
//!   then newest first.
//!
//! Both share the same pagination rules (`pagination`) and response envelope.
//!
//! ## Submodules
//! - **`engine`**: the backend trait, snapshot search and request timing.
//! - **`handlers`**: `/search` and `/health` for the Axum router.
//! - **`matcher`**: query normalization and the substring rule.
//! - **`types`**: `Message` and the DTOs for API communication.

pub mod engine;
pub mod error;
pub mod handlers;
pub mod matcher;
pub mod memory;
pub mod pagination;
pub mod sqlite;
pub mod types;

pub use engine::{search_snapshot, SearchBackend};
pub use error::SearchError;
pub use memory::SubstringSearch;
pub use pagination::PageRequest;
pub use sqlite::RankedSearch;
