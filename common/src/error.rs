//! Error types for fastexchange.

use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

use crate::monetary::CurrencyKind;

/// Longest body excerpt rendered by [`SourceFailure`]'s `Display`.
const BODY_PREVIEW_CHARS: usize = 256;

/// An operation combined values of two different kinds.
///
/// The kinds are kept as display strings so the same error covers currency
/// kinds and token kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Kind mismatch: cannot combine {left} with {right}")]
pub struct KindMismatchError {
    pub left: String,
    pub right: String,
}

impl KindMismatchError {
    pub fn new(left: impl fmt::Display, right: impl fmt::Display) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

/// Diagnostics for a failed call to an external source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    /// Request URL, including the query string.
    pub url: String,
    /// HTTP status, or `None` when no response arrived.
    pub status: Option<u16>,
    /// Response body as received (empty when no response arrived).
    pub body: String,
    /// What went wrong.
    pub reason: String,
}

impl SourceFailure {
    /// A response arrived but was rejected.
    pub fn response(
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            status: Some(status),
            body: body.into(),
            reason: reason.into(),
        }
    }

    /// The request failed before any response arrived.
    pub fn transport(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: None,
            body: String::new(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (url={}", self.reason, self.url)?;
        if let Some(status) = self.status {
            write!(f, ", status={status}")?;
        }
        if !self.body.is_empty() {
            let preview: String = self.body.chars().take(BODY_PREVIEW_CHARS).collect();
            let ellipsis = if preview.len() < self.body.len() { "..." } else { "" };
            write!(f, ", body={preview}{ellipsis}")?;
        }
        write!(f, ")")
    }
}

/// Main error type for fastexchange operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Values of different kinds were combined.
    #[error(transparent)]
    KindMismatch(#[from] KindMismatchError),

    /// The client has no source for the requested pair.
    #[error("Unsupported conversion from {from} to {to} by {client}")]
    ConversionUnsupported {
        from: CurrencyKind,
        to: CurrencyKind,
        client: String,
    },

    /// Non-success status or malformed payload from an external source.
    #[error("External source failure: {0}")]
    ExternalSourceFailure(SourceFailure),

    /// An amount or raw quantity could not be parsed or scaled.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A currency code outside the supported set.
    #[error("Unknown currency kind: {0}")]
    UnknownKind(String),

    /// Conversions never scale by a negative rate.
    #[error("Negative conversion rate: {0}")]
    NegativeRate(Decimal),

    /// A token rate of zero would divide by zero.
    #[error("Conversion rate cannot be zero")]
    ZeroRate,

    /// The result does not fit in a `Decimal`.
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),
}

impl Error {
    /// Nothing in this library retries; every failure goes straight to the caller.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for logs and callers that match on strings.
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::KindMismatch(_) => "KIND_MISMATCH",
            Error::ConversionUnsupported { .. } => "CONVERSION_UNSUPPORTED",
            Error::ExternalSourceFailure(_) => "EXTERNAL_SOURCE_FAILURE",
            Error::InvalidAmount(_) => "INVALID_AMOUNT",
            Error::UnknownKind(_) => "UNKNOWN_KIND",
            Error::NegativeRate(_) => "NEGATIVE_RATE",
            Error::ZeroRate => "ZERO_RATE",
            Error::Overflow(_) => "OVERFLOW",
        }
    }

    /// Response diagnostics, when the failure came from an external source.
    pub fn source_failure(&self) -> Option<&SourceFailure> {
        match self {
            Error::ExternalSourceFailure(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<SourceFailure> for Error {
    fn from(failure: SourceFailure) -> Self {
        Error::ExternalSourceFailure(failure)
    }
}

/// Result type alias for fastexchange operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mismatch_message() {
        let err: Error = KindMismatchError::new(CurrencyKind::Usd, CurrencyKind::Eur).into();
        assert_eq!(err.to_string(), "Kind mismatch: cannot combine USD with EUR");
        assert_eq!(err.error_code(), "KIND_MISMATCH");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_source_failure_display() {
        let failure = SourceFailure::response("https://example.test/rate", 503, "down", "unexpected status");
        assert_eq!(
            failure.to_string(),
            "unexpected status (url=https://example.test/rate, status=503, body=down)"
        );

        let failure = SourceFailure::transport("https://example.test/rate", "connection refused");
        assert_eq!(
            failure.to_string(),
            "connection refused (url=https://example.test/rate)"
        );
    }

    #[test]
    fn test_source_failure_body_is_truncated() {
        let body = "x".repeat(BODY_PREVIEW_CHARS + 10);
        let failure = SourceFailure::response("u", 500, body, "boom");
        assert!(failure.to_string().ends_with("...)"));
    }

    #[test]
    fn test_conversion_unsupported_message() {
        let err = Error::ConversionUnsupported {
            from: CurrencyKind::Usd,
            to: CurrencyKind::Usd,
            client: "CurrencyMeUk".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported conversion from USD to USD by CurrencyMeUk");
        assert!(err.source_failure().is_none());
    }
}
