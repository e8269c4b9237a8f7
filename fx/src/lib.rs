//! fastexchange FX
//!
//! Exchange-rate lookup and currency conversion.
//!
//! # Features
//!
//! - A [`RateProvider`] seam for rate sources
//! - A static table of supported pairs, checked before any network call
//! - A scraping provider for currency.me.uk
//! - [`ExchangeClient`], which turns a value of one kind into another
//!
//! Rates are fetched once per call. Nothing is cached and nothing is retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fastexchange_common::{CurrencyKind, CurrencyValue};
//! use fastexchange_fx::ExchangeClient;
//! use fastexchange_transport::PooledTransport;
//!
//! let transport = Arc::new(PooledTransport::with_defaults()?);
//! let client = ExchangeClient::currency_me_uk(transport);
//!
//! let usd = CurrencyValue::from_str_amount("1000.00", CurrencyKind::Usd)?;
//! let eur = client.exchange(&usd, CurrencyKind::Eur).await?;
//! ```

pub mod client;
pub mod conversion;
pub mod currency_me_uk;
pub mod mapping;
pub mod provider;

pub use client::ExchangeClient;
pub use conversion::{exchange, Conversion};
pub use currency_me_uk::CurrencyMeUkProvider;
pub use mapping::PairMapping;
pub use provider::RateProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use provider::MockRateProvider;
