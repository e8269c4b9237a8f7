//! The transport trait and its pooled reqwest implementation.

use async_trait::async_trait;
use fastexchange_common::{Result, SourceFailure};
use tracing::{debug, instrument, warn};

use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::response::HttpResponse;

/// Outbound HTTP used by every client in the workspace.
///
/// Implementations must be safe to share across many concurrent requests.
/// A request that fails before a response arrives is reported as
/// `Error::ExternalSourceFailure` with no status.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET with the given query parameters.
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse>;
}

/// Pooled HTTP transport.
///
/// Wraps a single `reqwest::Client` so every clone shares one connection
/// pool. No cookie store is attached: requests never inherit session state
/// from one another, and callers that need a cookie must send it explicitly.
#[derive(Debug, Clone)]
pub struct PooledTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl PooledTransport {
    /// Build a transport from validated configuration.
    pub fn new(config: TransportConfig) -> std::result::Result<Self, TransportError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a transport with default configuration.
    pub fn with_defaults() -> std::result::Result<Self, TransportError> {
        Self::new(TransportConfig::default())
    }

    /// Get the configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for PooledTransport {
    #[instrument(skip_all, fields(url = %url))]
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Request failed before a response arrived");
                SourceFailure::transport(url, e.to_string())
            })?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let body = response.text().await.map_err(|e| {
            warn!(status, error = %e, "Failed to read response body");
            SourceFailure::response(final_url.clone(), status, String::new(), e.to_string())
        })?;

        debug!(status, bytes = body.len(), "Response received");

        Ok(HttpResponse {
            url: final_url,
            status,
            headers,
            body,
        })
    }
}
