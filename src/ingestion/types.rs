//! Ingestion Data Types
//!
//! Wire format of the upstream feed and the summary produced by a load.

use serde::{Deserialize, Serialize};

/// One page of the upstream feed: `{"items": [...], "total": n}`.
///
/// Items are kept as raw JSON so that every record is validated in one place,
/// after the whole feed has been drained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamPage {
    pub items: Vec<serde_json::Value>,
    pub total: usize,
}

/// Summary of a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    /// Number of `fetch_page` calls issued.
    pub pages: usize,
    /// Total reported by the last page.
    pub reported_total: usize,
    pub messages: usize,
}
