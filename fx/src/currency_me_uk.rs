//! Rate provider backed by the currency.me.uk converter pages.
//!
//! Each supported pair has its own page (`/convert/usd/eur`, ...). The rate is
//! the `value` attribute of the page's `<input id="answer">` element.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use fastexchange_common::{CurrencyPair, Error, Result};
use fastexchange_transport::{validate_response, Transport};
use rust_decimal::Decimal;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

use crate::mapping::PairMapping;
use crate::provider::RateProvider;

/// Converter root on the public site.
pub const DEFAULT_BASE_URL: &str = "https://www.currency.me.uk/convert";

const PROVIDER_NAME: &str = "CurrencyMeUk";
const ANSWER_SELECTOR: &str = "input#answer";

/// Why a converter page could not be read as a rate.
#[derive(Debug, thiserror::Error)]
enum ScrapeError {
    #[error("invalid selector {0}")]
    Selector(String),

    #[error("no answer field in page")]
    MissingAnswer,

    #[error("answer {value:?} is not a decimal: {source}")]
    InvalidNumber {
        value: String,
        source: rust_decimal::Error,
    },

    #[error("answer {0} is not a positive rate")]
    NonPositive(Decimal),
}

/// Extract the first answer value from a converter page.
fn parse_rate(html: &str) -> std::result::Result<Decimal, ScrapeError> {
    let selector =
        Selector::parse(ANSWER_SELECTOR).map_err(|e| ScrapeError::Selector(e.to_string()))?;
    let document = Html::parse_document(html);

    let value = document
        .select(&selector)
        .find_map(|element| element.value().attr("value"))
        .ok_or(ScrapeError::MissingAnswer)?
        .trim()
        .to_string();

    let rate = Decimal::from_str(&value)
        .map_err(|source| ScrapeError::InvalidNumber { value, source })?;

    if rate <= Decimal::ZERO {
        return Err(ScrapeError::NonPositive(rate));
    }

    Ok(rate)
}

/// Scrapes exchange rates from currency.me.uk.
pub struct CurrencyMeUkProvider {
    transport: Arc<dyn Transport>,
    base_url: String,
    mapping: PairMapping,
}

impl CurrencyMeUkProvider {
    /// Create a provider over a shared transport with the default routes.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
            mapping: PairMapping::default(),
        }
    }

    /// Point the provider at another converter root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the supported-pair routes.
    pub fn with_mapping(mut self, mapping: PairMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn mapping(&self) -> &PairMapping {
        &self.mapping
    }
}

#[async_trait]
impl RateProvider for CurrencyMeUkProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    #[instrument(skip_all, fields(pair = %pair))]
    async fn get_rate(&self, pair: &CurrencyPair) -> Result<Decimal> {
        let path = self
            .mapping
            .path_for(pair)
            .ok_or_else(|| Error::ConversionUnsupported {
                from: pair.from,
                to: pair.to,
                client: PROVIDER_NAME.to_string(),
            })?;

        let url = format!("{}{}", self.base_url, path);
        let response = self.transport.get(&url, &[]).await?;
        let rate = validate_response(&response, 200, |r| parse_rate(r.text()))?;

        debug!(rate = %rate, "Fetched rate");
        Ok(rate)
    }

    fn supports_pair(&self, pair: &CurrencyPair) -> bool {
        self.mapping.contains(pair)
    }

    fn supported_pairs(&self) -> Vec<CurrencyPair> {
        self.mapping.pairs()
    }
}
