//! Ingestion Module
//!
//! Drains the upstream paginated message feed into the cache at startup.
//!
//! ## Workflow
//! 1. **Fetch**: `UpstreamClient::fetch_page(offset, limit)` from offset 0 in fixed windows.
//! 2. **Terminate**: stop once the accumulated count reaches the reported `total`;
//!    an empty page or the page cap aborts instead of spinning.
//! 3. **Decode**: validate every raw record into a `Message`, keeping upstream order.
//! 4. **Publish**: swap the full snapshot into `MessageCache` in one step.
//!
//! Any failure is fatal for the load; the cache is never left partially filled.

pub mod client;
pub mod error;
pub mod loader;
pub mod types;

pub use client::{HttpUpstreamClient, UpstreamClient};
pub use error::IngestError;
pub use loader::{decode_messages, Ingestor};
