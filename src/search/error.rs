//! Query-side error type.
//!
//! Handlers return `Result<T, SearchError>`; the [`IntoResponse`] impl maps each
//! variant to a status code. Backend failures are logged in full, callers only
//! see a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The snapshot has not been published yet.
    #[error("data not loaded yet")]
    NotReady,

    #[error("page {page} out of range (total pages: {total_pages})")]
    PageOutOfRange { page: usize, total_pages: usize },

    #[error("query must not be empty")]
    InvalidQuery,

    #[error("page must be >= 1, got {0}")]
    InvalidPage(usize),

    #[error("page_size must be between 1 and 100, got {0}")]
    InvalidPageSize(usize),

    /// The ranked backend's store failed.
    #[error("search backend error: {0}")]
    Backend(String),
}

impl SearchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            SearchError::PageOutOfRange { .. }
            | SearchError::InvalidQuery
            | SearchError::InvalidPage(_)
            | SearchError::InvalidPageSize(_) => StatusCode::BAD_REQUEST,
            SearchError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for SearchError {
    fn from(e: rusqlite::Error) -> Self {
        SearchError::Backend(e.to_string())
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match &self {
            SearchError::Backend(detail) => {
                tracing::error!(error = %detail, "search backend failed");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
