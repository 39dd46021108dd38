//! Single upstream call
//!
//! A worker performs exactly one fetch, turns it into exactly one
//! [`WorkerOutcome`] and delivers that outcome at most once. Every blocking
//! point (the fetch and the channel send) is raced against the shared
//! cancellation token, so a worker never outlives a cancelled request by more
//! than one poll.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use url::Url;

use shared::{ComponentId, RequestId, SampleResult, component_debug};

use crate::core::{parse_integers, sample_result};
use crate::error::WorkerError;
use crate::traits::RandomnessSource;

/// Result of one upstream call
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerOutcome {
    Success(SampleResult),
    Failure(WorkerError),
}

impl WorkerOutcome {
    pub fn into_result(self) -> Result<SampleResult, WorkerError> {
        match self {
            WorkerOutcome::Success(sample) => Ok(sample),
            WorkerOutcome::Failure(error) => Err(error),
        }
    }
}

impl From<Result<SampleResult, WorkerError>> for WorkerOutcome {
    fn from(result: Result<SampleResult, WorkerError>) -> Self {
        match result {
            Ok(sample) => WorkerOutcome::Success(sample),
            Err(error) => WorkerOutcome::Failure(error),
        }
    }
}

/// What happened to a worker's outcome after it was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Sent to the orchestrator
    Delivered,
    /// Not sent: the request was cancelled, the outcome was `Canceled`, or
    /// the orchestrator stopped receiving
    Suppressed,
}

/// One concurrent upstream call
pub struct Worker<S: ?Sized> {
    id: u32,
    request_id: RequestId,
    source: Arc<S>,
    url: Url,
    timeout: Duration,
    token: CancellationToken,
}

impl<S> Worker<S>
where
    S: RandomnessSource + ?Sized,
{
    pub fn new(
        id: u32,
        request_id: RequestId,
        source: Arc<S>,
        url: Url,
        timeout: Duration,
        token: CancellationToken,
    ) -> Self {
        Self {
            id,
            request_id,
            source,
            url,
            timeout,
            token,
        }
    }

    /// Perform the upstream call and classify it.
    ///
    /// Returns `Failure(Canceled)` as soon as the shared token fires, even
    /// if the call is still in flight.
    pub async fn fetch(&self) -> WorkerOutcome {
        let call = async {
            let body = tokio::time::timeout(self.timeout, self.source.fetch(&self.url))
                .await
                .map_err(|_| WorkerError::Timeout)??;
            let data = parse_integers(&body)?;
            Ok::<_, WorkerError>(sample_result(data))
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => WorkerOutcome::Failure(WorkerError::Canceled),
            result = call => WorkerOutcome::from(result),
        }
    }

    /// Fetch, then report the outcome on the matching channel.
    ///
    /// `Canceled` outcomes are never reported. A send that would race a
    /// cancelled token is abandoned instead.
    pub async fn run(
        self,
        success_tx: mpsc::Sender<SampleResult>,
        failure_tx: mpsc::Sender<WorkerError>,
    ) -> Delivery {
        let component = ComponentId::Worker(self.id);
        component_debug!(component, request_id = %self.request_id, url = %self.url, "Fetching");

        match self.fetch().await {
            WorkerOutcome::Success(sample) => {
                component_debug!(component, request_id = %self.request_id, count = sample.len(), "Fetched sample");
                self.deliver(&success_tx, sample).await
            }
            WorkerOutcome::Failure(WorkerError::Canceled) => {
                component_debug!(component, request_id = %self.request_id, "Canceled before completion");
                Delivery::Suppressed
            }
            WorkerOutcome::Failure(error) => {
                component_debug!(component, request_id = %self.request_id, error = %error, kind = ?error.kind(), "Fetch failed");
                self.deliver(&failure_tx, error).await
            }
        }
    }

    async fn deliver<T>(&self, tx: &mpsc::Sender<T>, value: T) -> Delivery
    where
        T: Send,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Delivery::Suppressed,
            sent = tx.send(value) => match sent {
                Ok(()) => Delivery::Delivered,
                Err(_) => Delivery::Suppressed,
            },
        }
    }
}
