use super::error::IngestError;
use super::types::UpstreamPage;

use async_trait::async_trait;
use std::time::Duration;

/// Source of the paginated message feed.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<UpstreamPage, IngestError>;
}

/// `GET <endpoint>?limit=<n>&offset=<n>` over HTTP.
pub struct HttpUpstreamClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpUpstreamClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            http_client,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<UpstreamPage, IngestError> {
        let fetch_failed = |source| IngestError::UpstreamFetchFailed { offset, source };

        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await
            .map_err(fetch_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::UpstreamStatus {
                offset,
                status: status.as_u16(),
            });
        }

        response.json::<UpstreamPage>().await.map_err(fetch_failed)
    }
}
