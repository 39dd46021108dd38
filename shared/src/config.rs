//! Service configuration
//!
//! Everything that used to be a hard-coded constant (upstream URL, range
//! bounds, timeout, request limits) is carried here so tests can point the
//! service at a substitute upstream.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::{SharedError, SharedResult};

/// Default randomness provider endpoint
pub const DEFAULT_UPSTREAM_URL: &str = "https://www.random.org/integers/";

/// Upstream request parameters shared by every worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: Url,
    pub min: i64,
    pub max: i64,
    pub columns: u32,
    pub base: u32,
    pub format: String,
    pub timeout: Duration,
}

impl UpstreamConfig {
    /// Create config pointing at `base_url` with the default parameters
    pub fn with_base_url(base_url: &str) -> SharedResult<Self> {
        let base_url = Url::parse(base_url).map_err(|_| SharedError::InvalidUrl {
            input: base_url.to_string(),
        })?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> SharedResult<()> {
        if self.min > self.max {
            return Err(SharedError::invalid_config(
                "min",
                format!("{} > max {}", self.min, self.max),
            ));
        }
        if self.columns == 0 {
            return Err(SharedError::invalid_config("columns", self.columns));
        }
        if !matches!(self.base, 2 | 8 | 10 | 16) {
            return Err(SharedError::invalid_config("base", self.base));
        }
        if self.timeout.is_zero() {
            return Err(SharedError::invalid_config("timeout", "0s"));
        }
        Ok(())
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            // Constant literal, always parses.
            base_url: Url::parse(DEFAULT_UPSTREAM_URL).expect("default upstream URL is valid"),
            min: 1,
            max: 1000,
            columns: 1,
            base: 10,
            format: "plain".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// HTTP surface configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for the `requests` query parameter
    pub max_requests: u32,
    /// Upper bound for the `length` query parameter
    pub max_length: u32,
    /// Round `stddev` in responses to this many decimals; `None` leaves it as computed
    pub round_decimals: Option<u32>,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> SharedResult<()> {
        if self.host.trim().is_empty() {
            return Err(SharedError::invalid_config("host", "<empty>"));
        }
        if let Some(decimals) = self.round_decimals {
            if decimals > 15 {
                return Err(SharedError::invalid_config("round_decimals", decimals));
            }
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8090,
            max_requests: 1000,
            max_length: 10000,
            round_decimals: None,
        }
    }
}
