//! Transport configuration.

use std::time::Duration;

use crate::error::TransportError;

/// Configuration for [`crate::PooledTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// TCP/TLS connect timeout.
    pub connect_timeout: Duration,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Idle connections kept per host.
    pub pool_max_idle_per_host: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("fastexchange/", env!("CARGO_PKG_VERSION")).to_string(),
            pool_max_idle_per_host: 16,
        }
    }
}

impl TransportConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(secs) = env_secs("FASTEXCHANGE_HTTP_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(secs) = env_secs("FASTEXCHANGE_HTTP_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout = Duration::from_secs(secs);
        }

        if let Ok(agent) = std::env::var("FASTEXCHANGE_USER_AGENT") {
            config.user_agent = agent;
        }

        config
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), TransportError> {
        if self.timeout.is_zero() {
            return Err(TransportError::InvalidConfig(
                "Request timeout cannot be zero".to_string(),
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(TransportError::InvalidConfig(
                "Connect timeout cannot be zero".to_string(),
            ));
        }

        if self.connect_timeout > self.timeout {
            return Err(TransportError::InvalidConfig(
                "Connect timeout cannot exceed request timeout".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(TransportError::InvalidConfig(
                "User agent cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_secs(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.trim().parse().ok()
}
