//! Fan-out/fan-in coordinator
//!
//! One call to [`Orchestrator::run`] handles one incoming request:
//!
//! - **Launching**: build the upstream URL once, derive a request token from
//!   the caller's token, spawn `worker_count` workers into a `JoinSet`.
//! - **Collecting**: wait for caller disconnect, a failure, or a success.
//!   The first failure cancels every sibling and ends the request; a caller
//!   disconnect cancels every sibling and drains the outstanding tasks.
//! - **Succeeded**: once `worker_count` successes arrived, compute the
//!   combined statistic and return the report.
//!
//! Nothing is shared between requests except the randomness source.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use shared::{
    AggregateReport, ComponentId, RequestId, RequestSpec, SampleResult, UpstreamConfig,
    component_debug, component_error, component_info, component_warn,
};

use crate::core::{build_upstream_url, sample_result};
use crate::error::{OrchestratorError, OrchestratorResult, WorkerError};
use crate::traits::RandomnessSource;
use crate::worker::{Delivery, Worker};

/// Upper bound on the per-worker slots reserved up front
const PREALLOCATED_SAMPLES: u32 = 1024;

/// Accumulates successful samples in completion order
struct Collection {
    expected: u32,
    per_worker: Vec<SampleResult>,
    combined: Vec<i64>,
}

impl Collection {
    fn new(expected: u32) -> Self {
        Self {
            expected,
            per_worker: Vec::with_capacity(expected.min(PREALLOCATED_SAMPLES) as usize),
            combined: Vec::new(),
        }
    }

    fn received(&self) -> u32 {
        self.per_worker.len() as u32
    }

    fn is_complete(&self) -> bool {
        self.received() >= self.expected
    }

    fn push(&mut self, sample: SampleResult) {
        self.combined.extend_from_slice(&sample.data);
        self.per_worker.push(sample);
    }

    fn into_report(self) -> AggregateReport {
        AggregateReport {
            per_worker_results: self.per_worker,
            combined: sample_result(self.combined),
        }
    }
}

/// Fan-out/fan-in orchestrator over a randomness source
pub struct Orchestrator<S: ?Sized> {
    source: Arc<S>,
    config: UpstreamConfig,
}

impl<S> Orchestrator<S>
where
    S: RandomnessSource + 'static,
{
    pub fn new(source: S, config: UpstreamConfig) -> Self {
        Self::with_shared_source(Arc::new(source), config)
    }

    pub fn with_shared_source(source: Arc<S>, config: UpstreamConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Run one request to completion.
    ///
    /// `caller` is cancelled by the HTTP layer when the client goes away.
    /// Returns the full report, the first observed worker failure, or
    /// [`OrchestratorError::CallerDisconnected`]; never a partial report.
    pub async fn run(
        &self,
        request_id: RequestId,
        spec: RequestSpec,
        caller: CancellationToken,
    ) -> OrchestratorResult<AggregateReport> {
        let component = ComponentId::Orchestrator;
        let expected = spec.worker_count;

        // Launching
        let url = build_upstream_url(&self.config, spec.quantity_per_worker);
        let token = caller.child_token();
        // Cancels in-flight workers if this future is dropped before a terminal state
        let _guard = token.clone().drop_guard();

        let capacity = (expected as usize).max(1);
        let (success_tx, mut success_rx) = mpsc::channel::<SampleResult>(capacity);
        let (failure_tx, mut failure_rx) = mpsc::channel::<WorkerError>(capacity);

        let mut tasks = JoinSet::new();
        for id in 0..expected {
            let worker = Worker::new(
                id,
                request_id,
                Arc::clone(&self.source),
                url.clone(),
                self.config.timeout,
                token.clone(),
            );
            tasks.spawn(worker.run(success_tx.clone(), failure_tx.clone()));
        }
        drop(success_tx);
        drop(failure_tx);

        component_info!(
            component,
            request_id = %request_id,
            workers = expected,
            length = spec.quantity_per_worker,
            "Launched workers"
        );

        // Collecting
        let mut collection = Collection::new(expected);
        let mut successes_open = true;
        let mut failures_open = true;

        while !collection.is_complete() {
            if !successes_open && !failures_open {
                let received = collection.received();
                component_warn!(component, request_id = %request_id, expected, received, "Workers exited without reporting");
                Self::drain(&mut tasks, request_id).await;
                return Err(OrchestratorError::WorkerLost { expected, received });
            }

            tokio::select! {
                biased;
                _ = caller.cancelled() => {
                    component_warn!(component, request_id = %request_id, "Caller disconnected, cancelling workers");
                    token.cancel();
                    Self::drain(&mut tasks, request_id).await;
                    return Err(OrchestratorError::CallerDisconnected);
                }
                failure = failure_rx.recv(), if failures_open => match failure {
                    Some(error) => {
                        component_warn!(
                            component,
                            request_id = %request_id,
                            error = %error,
                            kind = ?error.kind(),
                            "Worker failed, cancelling siblings"
                        );
                        token.cancel();
                        tasks.shutdown().await;
                        return Err(OrchestratorError::RequestFailed(error));
                    }
                    None => failures_open = false,
                },
                sample = success_rx.recv(), if successes_open => match sample {
                    Some(sample) => {
                        collection.push(sample);
                        component_debug!(component, request_id = %request_id, received = collection.received(), expected, "Collected sample");
                    }
                    None => successes_open = false,
                },
            }
        }

        // Succeeded
        Self::drain(&mut tasks, request_id).await;
        let report = collection.into_report();
        component_info!(
            component,
            request_id = %request_id,
            workers = report.per_worker_results.len(),
            total = report.total_len(),
            stddev = report.combined.standard_deviation,
            "Request succeeded"
        );
        Ok(report)
    }

    /// Join every outstanding worker task
    async fn drain(tasks: &mut JoinSet<Delivery>, request_id: RequestId) {
        let mut suppressed = 0usize;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Delivery::Delivered) => {}
                Ok(Delivery::Suppressed) => suppressed += 1,
                Err(e) if e.is_panic() => {
                    component_error!(ComponentId::Orchestrator, request_id = %request_id, error = %e, "Worker task panicked");
                }
                Err(e) => {
                    component_warn!(ComponentId::Orchestrator, request_id = %request_id, error = %e, "Worker task did not finish cleanly");
                }
            }
        }
        if suppressed > 0 {
            component_debug!(ComponentId::Orchestrator, request_id = %request_id, suppressed, "Drained workers");
        }
    }
}
