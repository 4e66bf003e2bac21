//! Message Search Service Library
//!
//! Core modules of the message search service. The binary (`main.rs`) wires
//! them together and owns the startup sequence.
//!
//! ## Architecture Modules
//! - **`ingestion`**: Drains the paginated upstream feed into a complete list of
//!   messages, failing the whole load on any fetch or decode error.
//! - **`cache`**: Owned holder of the loaded snapshot, published exactly once.
//! - **`search`**: The query engine. A single `SearchBackend` capability with an
//!   in-memory substring backend and a SQLite FTS5 ranked backend, plus the
//!   HTTP handlers.
//! - **`config`**: Environment and command-line configuration.
//! - **`server`**: Router assembly (routes, CORS, tracing).

pub mod cache;
pub mod config;
pub mod ingestion;
pub mod search;
pub mod server;
