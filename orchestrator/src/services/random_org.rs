//! reqwest-backed randomness source (random.org plain-text integers API)

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

use shared::UpstreamConfig;

use crate::error::{OrchestratorError, OrchestratorResult, WorkerError};
use crate::traits::RandomnessSource;

/// Real randomness source.
///
/// Holds one pooled `reqwest::Client`; cloning the source shares the pool.
#[derive(Clone, Debug)]
pub struct RealRandomnessSource {
    client: reqwest::Client,
}

impl RealRandomnessSource {
    /// Create a source whose every call is bounded by `config.timeout`
    pub fn new(config: &UpstreamConfig) -> OrchestratorResult<Self> {
        Self::with_timeout(config.timeout)
    }

    pub fn with_timeout(timeout: Duration) -> OrchestratorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OrchestratorError::ClientBuild {
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }

    fn classify_send_error(error: reqwest::Error) -> WorkerError {
        if error.is_timeout() {
            WorkerError::Timeout
        } else {
            WorkerError::Transport {
                message: error.to_string(),
            }
        }
    }

    fn classify_body_error(error: reqwest::Error) -> WorkerError {
        if error.is_timeout() {
            WorkerError::Timeout
        } else {
            WorkerError::BodyRead {
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl RandomnessSource for RealRandomnessSource {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, WorkerError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(WorkerError::UpstreamUnavailable {
                status: status.to_string(),
            });
        }

        let body = response.bytes().await.map_err(Self::classify_body_error)?;
        Ok(body.to_vec())
    }
}
