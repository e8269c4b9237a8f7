//! fastexchange HTTP Transport
//!
//! The network layer shared by the rate and transfer clients. Clients never
//! build their own HTTP stack: they take an `Arc<dyn Transport>` so callers
//! own the connection pool and tests can substitute [`MockTransport`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fastexchange_transport::{PooledTransport, TransportConfig};
//!
//! let transport = Arc::new(PooledTransport::new(TransportConfig::from_env())?);
//! let response = transport.get("https://www.currency.me.uk/convert/usd/eur", &[]).await?;
//! ```

pub mod config;
pub mod connection;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod response;

pub use config::TransportConfig;
pub use connection::{PooledTransport, Transport};
pub use error::TransportError;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockTransport;
pub use response::{validate_response, HttpResponse};
