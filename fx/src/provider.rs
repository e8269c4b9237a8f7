//! Rate provider trait and test implementation.

use async_trait::async_trait;
use fastexchange_common::{CurrencyPair, Result};
use rust_decimal::Decimal;

/// A source of exchange rates.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Get the provider name, reported in `ConversionUnsupported` errors.
    fn name(&self) -> &str;

    /// Fetch the current rate for a pair: units of `pair.to` per unit of `pair.from`.
    async fn get_rate(&self, pair: &CurrencyPair) -> Result<Decimal>;

    /// Check if this provider supports the given currency pair.
    fn supports_pair(&self, pair: &CurrencyPair) -> bool;

    /// Get all supported currency pairs.
    fn supported_pairs(&self) -> Vec<CurrencyPair>;
}

/// Mock rate provider for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockRateProvider {
    name: String,
    rates: dashmap::DashMap<CurrencyPair, Decimal>,
    failures: dashmap::DashMap<CurrencyPair, fastexchange_common::SourceFailure>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockRateProvider {
    /// Create a new mock provider.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rates: dashmap::DashMap::new(),
            failures: dashmap::DashMap::new(),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Set a rate for a currency pair.
    pub fn set_rate(&self, pair: CurrencyPair, rate: Decimal) {
        self.rates.insert(pair, rate);
    }

    /// Make a supported pair fail with the given diagnostics.
    pub fn set_failure(&self, pair: CurrencyPair, failure: fastexchange_common::SourceFailure) {
        self.failures.insert(pair, failure);
    }

    /// Number of `get_rate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateProvider for MockRateProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_rate(&self, pair: &CurrencyPair) -> Result<Decimal> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        if let Some(failure) = self.failures.get(pair) {
            return Err(failure.value().clone().into());
        }

        self.rates.get(pair).map(|r| *r.value()).ok_or_else(|| {
            fastexchange_common::Error::ConversionUnsupported {
                from: pair.from,
                to: pair.to,
                client: self.name.clone(),
            }
        })
    }

    fn supports_pair(&self, pair: &CurrencyPair) -> bool {
        self.rates.contains_key(pair) || self.failures.contains_key(pair)
    }

    fn supported_pairs(&self) -> Vec<CurrencyPair> {
        let mut pairs: Vec<CurrencyPair> = self.rates.iter().map(|r| *r.key()).collect();
        pairs.sort();
        pairs
    }
}
