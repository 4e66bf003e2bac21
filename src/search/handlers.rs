use super::engine::{execute, SearchBackend};
use super::error::SearchError;
use super::pagination::{PageRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use super::types::{HealthResponse, SearchParams, SearchResult};

use axum::extract::Query;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

pub type SharedBackend = Arc<dyn SearchBackend>;

pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(backend): Extension<SharedBackend>,
) -> Result<Json<SearchResult>, SearchError> {
    if params.q.is_empty() {
        return Err(SearchError::InvalidQuery);
    }

    let page = PageRequest::new(
        params.page.unwrap_or(DEFAULT_PAGE),
        params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    )?;

    let result = execute(backend.as_ref(), &params.q, page).await?;
    Ok(Json(result))
}

/// Always 200, so a not-ready service is still observable.
pub async fn handle_health(
    Extension(backend): Extension<SharedBackend>,
) -> (StatusCode, Json<HealthResponse>) {
    let (ready, messages_cached) = match backend.status().await {
        Ok(status) => (status.ready, status.messages),
        Err(e) => {
            tracing::error!("Health check could not read backend status: {}", e);
            (false, 0)
        }
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            ready,
            backend: backend.name().to_string(),
            messages_cached,
        }),
    )
}
