use thiserror::Error;

/// Fatal ingestion failures. Any of these aborts the whole load; nothing is
/// published to the cache.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("upstream fetch failed at offset {offset}: {source}")]
    UpstreamFetchFailed {
        offset: usize,
        #[source]
        source: reqwest::Error,
    },

    #[error("upstream returned HTTP {status} at offset {offset}")]
    UpstreamStatus { offset: usize, status: u16 },

    #[error("record {index} could not be decoded: {source}")]
    DecodeFailed {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate message id {0:?}")]
    DuplicateId(String),

    #[error("upstream stalled at {received} of {total} items (empty page at offset {offset})")]
    Stalled {
        offset: usize,
        received: usize,
        total: usize,
    },

    #[error("gave up after {pages} pages with {received} of {total} items")]
    PageLimitExceeded {
        pages: usize,
        received: usize,
        total: usize,
    },
}
