use super::client::UpstreamClient;
use super::error::IngestError;
use super::types::IngestReport;
use crate::cache::MessageCache;
use crate::search::types::Message;

use std::collections::HashSet;
use std::sync::Arc;

pub const DEFAULT_PAGE_WINDOW: usize = 200;
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Drains the upstream feed into a complete list of messages.
pub struct Ingestor {
    client: Arc<dyn UpstreamClient>,
    page_window: usize,
    max_pages: usize,
}

impl Ingestor {
    pub fn new(client: Arc<dyn UpstreamClient>) -> Self {
        Self {
            client,
            page_window: DEFAULT_PAGE_WINDOW,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Window must be at least 1; zero is clamped.
    pub fn with_page_window(mut self, page_window: usize) -> Self {
        self.page_window = page_window.max(1);
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Fetches every page until the accumulated count reaches the latest
    /// reported total, then decodes all records in upstream order.
    ///
    /// An empty page before the total is reached fails with `Stalled`, and
    /// more than `max_pages` fetches fails with `PageLimitExceeded`.
    pub async fn run(&self) -> Result<(Vec<Message>, IngestReport), IngestError> {
        let mut raw: Vec<serde_json::Value> = Vec::new();
        let mut offset = 0usize;
        let mut pages = 0usize;

        let total = loop {
            let page = self.client.fetch_page(offset, self.page_window).await?;
            pages += 1;

            let received = page.items.len();
            raw.extend(page.items);
            tracing::debug!(
                "Fetched page offset={} received={} accumulated={} total={}",
                offset,
                received,
                raw.len(),
                page.total
            );

            if raw.len() >= page.total {
                break page.total;
            }
            if received == 0 {
                return Err(IngestError::Stalled {
                    offset,
                    received: raw.len(),
                    total: page.total,
                });
            }
            if pages >= self.max_pages {
                return Err(IngestError::PageLimitExceeded {
                    pages,
                    received: raw.len(),
                    total: page.total,
                });
            }

            offset += self.page_window;
        };

        let messages = decode_messages(raw)?;
        let report = IngestReport {
            pages,
            reported_total: total,
            messages: messages.len(),
        };
        Ok((messages, report))
    }

    /// Runs the load and publishes into `cache`, or marks it failed.
    pub async fn load_into(&self, cache: &MessageCache) -> Result<IngestReport, IngestError> {
        cache.begin_loading();
        tracing::info!("Loading messages from upstream...");

        match self.run().await {
            Ok((messages, report)) => {
                cache.publish(messages);
                tracing::info!(
                    "Loaded {} messages into cache ({} pages)",
                    report.messages,
                    report.pages
                );
                Ok(report)
            }
            Err(e) => {
                tracing::error!("Ingestion failed: {}", e);
                cache.mark_failed(e.to_string());
                Err(e)
            }
        }
    }
}

/// Validates raw records into messages, preserving order.
///
/// Fails on the first undecodable record or repeated id.
pub fn decode_messages(raw: Vec<serde_json::Value>) -> Result<Vec<Message>, IngestError> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut messages = Vec::with_capacity(raw.len());

    for (index, value) in raw.into_iter().enumerate() {
        let message: Message = serde_json::from_value(value)
            .map_err(|source| IngestError::DecodeFailed { index, source })?;
        if !seen.insert(message.id.clone()) {
            return Err(IngestError::DuplicateId(message.id));
        }
        messages.push(message);
    }

    Ok(messages)
}
