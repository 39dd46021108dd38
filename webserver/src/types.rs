//! Type definitions for webserver
//!
//! Query parameters accepted by the API and the JSON payloads it returns.

use serde::{Deserialize, Serialize};
use shared::{RequestSpec, ServerConfig};

use crate::error::ApiError;

/// Query string of `GET /random/mean`.
///
/// Both fields are required; a missing or non-numeric value is rejected by
/// the extractor before it reaches [`RandomMeanQuery::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomMeanQuery {
    pub requests: u32,
    pub length: u32,
}

impl RandomMeanQuery {
    /// Range-check against the configured limits
    pub fn validate(&self, config: &ServerConfig) -> Result<RequestSpec, ApiError> {
        if self.requests > config.max_requests || self.length > config.max_length {
            return Err(ApiError::InvalidQuery);
        }
        Ok(RequestSpec::new(self.requests, self.length))
    }
}

/// One element of the success payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticEntry {
    pub stddev: f64,
    pub data: Vec<i64>,
}

/// Failure payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}
