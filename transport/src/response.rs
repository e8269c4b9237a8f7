//! Buffered HTTP responses and response validation.

use std::fmt;

use fastexchange_common::{Result, SourceFailure};
use serde::de::DeserializeOwned;
use tracing::warn;

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Final request URL, including the query string.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response headers with valid UTF-8 values.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    /// Create a response with no headers.
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Get the body as text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }

    /// Look up a header, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Diagnostics for rejecting this response.
    pub fn failure(&self, reason: impl Into<String>) -> SourceFailure {
        SourceFailure::response(self.url.clone(), self.status, self.body.clone(), reason)
    }
}

/// Check the status, then parse the body.
///
/// A status other than `expected_status`, or any error returned by `parse`,
/// becomes `Error::ExternalSourceFailure` carrying the response diagnostics.
/// No partial or default value is ever produced.
pub fn validate_response<T, E, F>(
    response: &HttpResponse,
    expected_status: u16,
    parse: F,
) -> Result<T>
where
    E: fmt::Display,
    F: FnOnce(&HttpResponse) -> std::result::Result<T, E>,
{
    if response.status != expected_status {
        warn!(
            url = %response.url,
            status = response.status,
            expected = expected_status,
            "Unexpected response status"
        );
        return Err(response
            .failure(format!(
                "expected status {expected_status}, got {}",
                response.status
            ))
            .into());
    }

    parse(response).map_err(|e| {
        warn!(url = %response.url, error = %e, "Malformed response payload");
        response.failure(format!("malformed payload: {e}")).into()
    })
}
