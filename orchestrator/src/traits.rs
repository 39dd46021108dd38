//! Service trait definitions for dependency injection
//!
//! The upstream call is abstracted so the fan-out logic can be driven by
//! mocks and fakes in tests.

use async_trait::async_trait;
use url::Url;

use crate::error::WorkerError;

/// Source of random integers reached over HTTP
#[mockall::automock]
#[async_trait]
pub trait RandomnessSource: Send + Sync {
    /// Perform one GET against `url` and return the raw body.
    ///
    /// Implementations classify transport-level problems: timeouts as
    /// [`WorkerError::Timeout`], non-200 statuses as
    /// [`WorkerError::UpstreamUnavailable`], other connection failures as
    /// [`WorkerError::Transport`] and body read failures as
    /// [`WorkerError::BodyRead`].
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, WorkerError>;
}
