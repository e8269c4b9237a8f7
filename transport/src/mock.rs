//! In-memory transport for tests.

use async_trait::async_trait;
use dashmap::DashMap;
use fastexchange_common::{Result, SourceFailure};
use parking_lot::Mutex;

use crate::connection::Transport;
use crate::response::HttpResponse;

/// Transport that serves canned responses and records every request.
///
/// Responses are keyed by URL without the query string. The recorded
/// request log holds the full URL with the encoded query.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: DashMap<String, (u16, String)>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with `status` for GETs to `url`.
    pub fn respond(&self, url: impl Into<String>, status: u16, body: impl Into<String>) {
        self.responses.insert(url.into(), (status, body.into()));
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Number of requests issued.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse> {
        let full_url = if query.is_empty() {
            url.to_string()
        } else {
            url::Url::parse_with_params(url, query)
                .map(|u| u.to_string())
                .map_err(|e| SourceFailure::transport(url, e.to_string()))?
        };
        self.requests.lock().push(full_url.clone());

        let (status, body) = self
            .responses
            .get(url)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SourceFailure::transport(full_url.clone(), "connection refused"))?;

        Ok(HttpResponse::new(full_url, status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_canned_response() {
        let transport = MockTransport::new();
        transport.respond("https://example.test/a", 200, "hello");

        let response = transport.get("https://example.test/a", &[]).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.text(), "hello");
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_records_query() {
        let transport = MockTransport::new();
        transport.respond("https://example.test/list", 200, "[]");

        transport
            .get("https://example.test/list", &[("limit", "50"), ("sort", "-timestamp")])
            .await
            .unwrap();

        assert_eq!(
            transport.requests(),
            vec!["https://example.test/list?limit=50&sort=-timestamp".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unknown_url_is_transport_failure() {
        let transport = MockTransport::new();
        let err = transport.get("https://example.test/missing", &[]).await.unwrap_err();

        assert_eq!(err.source_failure().unwrap().status, None);
    }
}
