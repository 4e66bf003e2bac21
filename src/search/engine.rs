use super::error::SearchError;
use super::matcher::filter_messages;
use super::pagination::PageRequest;
use super::types::{BackendStatus, MatchPage, Message, SearchResult};

use async_trait::async_trait;
use std::time::Instant;

/// The single capability "search the corpus".
///
/// Exactly one implementation is active per process; it is chosen when the
/// server is built and never swapped at runtime.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Short name reported by `/health`.
    fn name(&self) -> &'static str;

    async fn status(&self) -> Result<BackendStatus, SearchError>;

    /// Returns the total match count and the slice for `page`.
    ///
    /// Implementations must return `PageOutOfRange` when `page` starts past
    /// the last match and at least one match exists.
    async fn find(&self, query: &str, page: PageRequest) -> Result<MatchPage, SearchError>;
}

/// Substring search over a snapshot, paginated.
pub fn find_in_snapshot(
    snapshot: &[Message],
    query: &str,
    page: PageRequest,
) -> Result<MatchPage, SearchError> {
    let matched = filter_messages(snapshot, query);
    let total = matched.len();
    page.check_in_range(total)?;

    let items = page.slice(&matched).iter().map(|m| (*m).clone()).collect();
    Ok(MatchPage { total, items })
}

/// Pure search over a snapshot, producing the full response envelope.
pub fn search_snapshot(
    snapshot: &[Message],
    query: &str,
    page: usize,
    page_size: usize,
) -> Result<SearchResult, SearchError> {
    let request = PageRequest::new(page, page_size)?;
    let start = Instant::now();
    let found = find_in_snapshot(snapshot, query, request)?;
    Ok(build_result(query, request, found, start))
}

/// Runs `query` against the active backend and times it.
pub async fn execute(
    backend: &dyn SearchBackend,
    query: &str,
    page: PageRequest,
) -> Result<SearchResult, SearchError> {
    let start = Instant::now();
    let found = backend.find(query, page).await?;
    let result = build_result(query, page, found, start);

    tracing::debug!(
        "search q={:?} page={} total={} took_ms={}",
        result.query,
        result.page,
        result.total,
        result.took_ms
    );
    Ok(result)
}

fn build_result(query: &str, page: PageRequest, found: MatchPage, start: Instant) -> SearchResult {
    let took_ms = round_ms(start.elapsed().as_secs_f64() * 1000.0);
    SearchResult {
        query: query.to_string(),
        page: page.page(),
        page_size: page.page_size(),
        total: found.total,
        total_pages: page.total_pages(found.total),
        took_ms,
        results: found.items,
    }
}

fn round_ms(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}
