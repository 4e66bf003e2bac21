use serde::{Deserialize, Serialize};

/// A single chat entry as served by the upstream feed.
///
/// `timestamp` is kept as the upstream string; it is only ever used for
/// ordering in the ranked backend and is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub timestamp: String,
    pub message: String,
}

/// Response envelope for `GET /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub took_ms: f64,
    pub results: Vec<Message>,
}

/// One page of matches as produced by a backend, before timing is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPage {
    pub total: usize,
    pub items: Vec<Message>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub ready: bool,
    pub backend: String,
    pub messages_cached: usize,
}

/// Readiness of a backend as reported to `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendStatus {
    pub ready: bool,
    pub messages: usize,
}
