//! The exchange client.

use std::sync::Arc;

use fastexchange_common::{CurrencyKind, CurrencyPair, CurrencyValue, Error, Result};
use fastexchange_transport::Transport;
use tracing::{info, instrument, warn};

use crate::conversion::{exchange, Conversion};
use crate::currency_me_uk::CurrencyMeUkProvider;
use crate::provider::RateProvider;

/// Converts currency values through a single rate provider.
///
/// Every call checks the pair against the provider's supported set before
/// touching the network, then makes exactly one rate request. Failures are
/// returned as-is; there is no cache and no retry.
#[derive(Clone)]
pub struct ExchangeClient {
    provider: Arc<dyn RateProvider>,
}

impl ExchangeClient {
    /// Create a new client over the given provider.
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self { provider }
    }

    /// Client backed by currency.me.uk over a shared transport.
    pub fn currency_me_uk(transport: Arc<dyn Transport>) -> Self {
        Self::new(Arc::new(CurrencyMeUkProvider::new(transport)))
    }

    /// Name of the underlying provider.
    pub fn name(&self) -> &str {
        self.provider.name()
    }

    /// Check if a conversion between two kinds is supported.
    pub fn is_supported(&self, from: CurrencyKind, to: CurrencyKind) -> bool {
        self.provider.supports_pair(&CurrencyPair::new(from, to))
    }

    /// Get all supported currency pairs.
    pub fn supported_pairs(&self) -> Vec<CurrencyPair> {
        self.provider.supported_pairs()
    }

    /// Convert a value into another currency at the current rate.
    pub async fn exchange(&self, from: &CurrencyValue, to: CurrencyKind) -> Result<CurrencyValue> {
        Ok(self.exchange_with_record(from, to).await?.output)
    }

    /// Convert a value and return the full conversion record.
    #[instrument(skip_all, fields(
        provider = self.provider.name(),
        from = %from.kind(),
        to = %to,
        amount = %from.amount()
    ))]
    pub async fn exchange_with_record(
        &self,
        from: &CurrencyValue,
        to: CurrencyKind,
    ) -> Result<Conversion> {
        let pair = CurrencyPair::new(from.kind(), to);

        if !self.provider.supports_pair(&pair) {
            return Err(Error::ConversionUnsupported {
                from: pair.from,
                to: pair.to,
                client: self.provider.name().to_string(),
            });
        }

        let rate = self.provider.get_rate(&pair).await.map_err(|e| {
            warn!(error = %e, code = e.error_code(), "Rate lookup failed");
            e
        })?;

        let output = exchange(from, to, rate)?;
        let conversion = Conversion::new(*from, output, rate, self.provider.name());

        info!(
            conversion_id = %conversion.id,
            rate = %rate,
            output = %conversion.output,
            "Conversion completed"
        );

        Ok(conversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockRateProvider;
    use fastexchange_common::SourceFailure;
    use fastexchange_transport::MockTransport;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn setup_client() -> (ExchangeClient, Arc<MockRateProvider>) {
        let provider = Arc::new(MockRateProvider::new("test"));
        provider.set_rate(
            CurrencyPair::new(CurrencyKind::Usd, CurrencyKind::Eur),
            dec!(0.92),
        );
        provider.set_rate(
            CurrencyPair::new(CurrencyKind::Eur, CurrencyKind::Usd),
            dec!(1.08),
        );

        (ExchangeClient::new(provider.clone()), provider)
    }

    #[tokio::test]
    async fn test_exchange_usd_to_eur() {
        let (client, _) = setup_client();

        let eur = client
            .exchange(&CurrencyValue::usd(dec!(1)), CurrencyKind::Eur)
            .await
            .unwrap();

        assert_eq!(eur.kind(), CurrencyKind::Eur);
        assert_eq!(eur.amount(), dec!(0.92));
    }

    #[tokio::test]
    async fn test_exchange_eur_to_usd() {
        let (client, _) = setup_client();

        let usd = client
            .exchange(&CurrencyValue::eur(dec!(1000)), CurrencyKind::Usd)
            .await
            .unwrap();

        assert_eq!(usd, CurrencyValue::usd(dec!(1080)));
    }

    #[tokio::test]
    async fn test_unsupported_pair_skips_provider() {
        let (client, provider) = setup_client();

        let result = client
            .exchange(&CurrencyValue::usd(dec!(1)), CurrencyKind::Usd)
            .await;

        match result {
            Err(Error::ConversionUnsupported { from, to, client }) => {
                assert_eq!(from, CurrencyKind::Usd);
                assert_eq!(to, CurrencyKind::Usd);
                assert_eq!(client, "test");
            }
            other => panic!("expected ConversionUnsupported, got {other:?}"),
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_source_failure_is_surfaced() {
        let provider = Arc::new(MockRateProvider::new("test"));
        let pair = CurrencyPair::new(CurrencyKind::Usd, CurrencyKind::Eur);
        provider.set_failure(pair, SourceFailure::response("u", 502, "bad gateway", "boom"));
        let client = ExchangeClient::new(provider.clone());

        let result = client.exchange(&CurrencyValue::usd(dec!(1)), CurrencyKind::Eur).await;

        let err = tokio_test::assert_err!(result);
        assert_eq!(err.source_failure().unwrap().status, Some(502));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_overflowing_amount_is_an_error() {
        let (client, provider) = setup_client();

        let result = client
            .exchange(&CurrencyValue::eur(Decimal::MAX), CurrencyKind::Usd)
            .await;

        assert!(matches!(result, Err(Error::Overflow(_))));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_exchange_with_record() {
        let (client, _) = setup_client();

        let conversion = client
            .exchange_with_record(&CurrencyValue::usd(dec!(100)), CurrencyKind::Eur)
            .await
            .unwrap();

        assert_eq!(conversion.input, CurrencyValue::usd(dec!(100)));
        assert_eq!(conversion.output, CurrencyValue::eur(dec!(92)));
        assert_eq!(conversion.rate, dec!(0.92));
        assert_eq!(conversion.source, "test");
    }

    #[tokio::test]
    async fn test_currency_me_uk_end_to_end() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(
            "https://www.currency.me.uk/convert/usd/eur",
            200,
            r#"<input id="answer" value="0.9">"#,
        );
        let client = ExchangeClient::currency_me_uk(transport.clone());

        let eur = client
            .exchange(&CurrencyValue::usd(dec!(10)), CurrencyKind::Eur)
            .await
            .unwrap();

        assert_eq!(eur, CurrencyValue::eur(dec!(9)));
        assert_eq!(client.name(), "CurrencyMeUk");
        assert_eq!(transport.request_count(), 1);

        let result = client
            .exchange(&CurrencyValue::eur(dec!(1)), CurrencyKind::Eur)
            .await;
        assert!(matches!(result, Err(Error::ConversionUnsupported { .. })));
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn test_supported_pairs() {
        let (client, _) = setup_client();

        assert!(client.is_supported(CurrencyKind::Usd, CurrencyKind::Eur));
        assert!(!client.is_supported(CurrencyKind::Eur, CurrencyKind::Eur));
        assert_eq!(client.supported_pairs().len(), 2);
    }
}
