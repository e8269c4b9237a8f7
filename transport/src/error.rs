//! Transport construction errors.
//!
//! Failures of individual requests are reported as
//! `fastexchange_common::Error::ExternalSourceFailure`, not with this type.

use thiserror::Error;

/// Errors raised while building a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Configuration failed validation.
    #[error("Invalid transport configuration: {0}")]
    InvalidConfig(String),

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
