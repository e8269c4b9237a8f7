//! TRONSCAN TRC-20 gateway.

use std::sync::Arc;

use fastexchange_common::Result;
use fastexchange_transport::{validate_response, Transport};
use tracing::{info, instrument};

use crate::schema::Transfers;

/// Public TRONSCAN TRC-20 API root.
pub const DEFAULT_BASE_URL: &str = "https://apilist.tronscanapi.com/api/token_trc20";

/// Paging and ordering for a transfer history request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferQuery {
    /// Page size.
    pub limit: u32,
    /// Offset of the first transfer.
    pub start: u32,
    /// Sort key, `-` prefix for descending.
    pub sort: String,
    /// Ask the API to report totals.
    pub count: bool,
}

impl Default for TransferQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            start: 0,
            sort: "-timestamp".to_string(),
            count: true,
        }
    }
}

impl TransferQuery {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    pub fn with_count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }

    /// Query parameters for transfers related to `wallet`, in wire order.
    pub fn params(&self, wallet: &str) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.limit.to_string()),
            ("start", self.start.to_string()),
            ("sort", self.sort.clone()),
            ("count", self.count.to_string()),
            ("relatedAddress", wallet.to_string()),
        ]
    }
}

/// Reads TRC-20 transfer history for a wallet.
pub struct Trc20Gateway {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl Trc20Gateway {
    /// Create a gateway against the public API.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the gateway at another API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Latest transfers touching `wallet`, with default paging.
    pub async fn check_transactions(&self, wallet: &str) -> Result<Transfers> {
        self.check_transactions_with(wallet, &TransferQuery::default())
            .await
    }

    /// Transfers touching `wallet`, paged by `query`.
    #[instrument(skip_all, fields(wallet = %wallet, limit = query.limit, start = query.start))]
    pub async fn check_transactions_with(
        &self,
        wallet: &str,
        query: &TransferQuery,
    ) -> Result<Transfers> {
        let url = format!("{}/transfers", self.base_url);
        let params = query.params(wallet);
        let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let response = self.transport.get(&url, &params).await?;
        let transfers = validate_response(&response, 200, |r| r.json::<Transfers>())?;

        info!(
            total = transfers.total,
            returned = transfers.token_transfers.len(),
            "Fetched transfers"
        );
        Ok(transfers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::fixtures::TRANSFERS_JSON;
    use fastexchange_common::Error;
    use fastexchange_transport::MockTransport;
    use rust_decimal_macros::dec;

    const BASE: &str = "https://tron.test/api/token_trc20";
    const WALLET: &str = "TWalletAddr";

    fn gateway(transport: Arc<MockTransport>) -> Trc20Gateway {
        Trc20Gateway::new(transport).with_base_url(format!("{BASE}/"))
    }

    #[test]
    fn test_default_query() {
        let query = TransferQuery::default();
        assert_eq!(query.limit, 50);
        assert_eq!(query.start, 0);
        assert_eq!(query.sort, "-timestamp");
        assert!(query.count);
    }

    #[test]
    fn test_query_params_order() {
        let params = TransferQuery::default().with_limit(10).params(WALLET);
        let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();

        assert_eq!(keys, vec!["limit", "start", "sort", "count", "relatedAddress"]);
        assert_eq!(params[0].1, "10");
        assert_eq!(params[4].1, WALLET);
    }

    #[tokio::test]
    async fn test_check_transactions() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(format!("{BASE}/transfers"), 200, TRANSFERS_JSON);
        let gateway = gateway(transport.clone());

        let transfers = gateway.check_transactions(WALLET).await.unwrap();

        assert_eq!(transfers.total, 2);
        assert_eq!(transfers.token_transfers[0].to_usd(None).unwrap().amount(), dec!(2));
        assert_eq!(
            transport.requests(),
            vec![format!(
                "{BASE}/transfers?limit=50&start=0&sort=-timestamp&count=true&relatedAddress={WALLET}"
            )]
        );
    }

    #[tokio::test]
    async fn test_custom_paging() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(format!("{BASE}/transfers"), 200, TRANSFERS_JSON);
        let gateway = gateway(transport.clone());

        let query = TransferQuery::default().with_limit(5).with_start(20).with_count(false);
        gateway.check_transactions_with(WALLET, &query).await.unwrap();

        let requested = &transport.requests()[0];
        assert!(requested.contains("limit=5&start=20"));
        assert!(requested.contains("count=false"));
    }

    #[tokio::test]
    async fn test_non_200_is_source_failure() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(format!("{BASE}/transfers"), 503, "upstream unavailable");
        let gateway = gateway(transport);

        let err = gateway.check_transactions(WALLET).await.unwrap_err();

        let failure = err.source_failure().unwrap();
        assert_eq!(failure.status, Some(503));
        assert_eq!(failure.body, "upstream unavailable");
    }

    #[tokio::test]
    async fn test_malformed_json_is_source_failure() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(format!("{BASE}/transfers"), 200, r#"{"total": "lots"}"#);
        let gateway = gateway(transport);

        let result = gateway.check_transactions(WALLET).await;

        assert!(matches!(result, Err(Error::ExternalSourceFailure(_))));
    }

    #[tokio::test]
    async fn test_unreachable_is_source_failure() {
        let transport = Arc::new(MockTransport::new());
        let gateway = gateway(transport);

        let err = tokio_test::assert_err!(gateway.check_transactions(WALLET).await);
        assert_eq!(err.source_failure().unwrap().status, None);
    }
}
