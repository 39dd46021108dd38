//! Test helpers for orchestrator tests
//!
//! `ScriptedSource` is a hand-written randomness source whose calls follow a
//! script (respond after a delay, hang, or panic) and which counts how many
//! in-flight calls were abandoned by cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use url::Url;

use orchestrator::{Orchestrator, OrchestratorResult, RandomnessSource, WorkerError};
use shared::{AggregateReport, RequestId, RequestSpec};

use super::fixtures::TestFixtures;

/// One scripted upstream call
#[derive(Clone, Debug)]
pub enum Step {
    Respond {
        after: Duration,
        result: Result<Vec<u8>, WorkerError>,
    },
    Hang,
    Panic,
}

impl Step {
    pub fn ok(after_ms: u64, body: &[u8]) -> Self {
        Step::Respond {
            after: Duration::from_millis(after_ms),
            result: Ok(body.to_vec()),
        }
    }

    pub fn fail(after_ms: u64, error: WorkerError) -> Self {
        Step::Respond {
            after: Duration::from_millis(after_ms),
            result: Err(error),
        }
    }
}

/// Counts a call as abandoned unless it is disarmed before being dropped
struct InFlight<'a> {
    abandoned: &'a AtomicUsize,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(abandoned: &'a AtomicUsize) -> Self {
        Self {
            abandoned,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.abandoned.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Randomness source driven by a script indexed by call order
pub struct ScriptedSource {
    steps: Vec<Step>,
    fallback: Step,
    calls: AtomicUsize,
    completed: AtomicUsize,
    abandoned: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self::with_fallback(steps, Step::Hang)
    }

    /// Calls beyond the script length use `fallback`
    pub fn with_fallback(steps: Vec<Step>, fallback: Step) -> Self {
        Self {
            steps,
            fallback,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            abandoned: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn abandoned(&self) -> usize {
        self.abandoned.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RandomnessSource for ScriptedSource {
    async fn fetch(&self, _url: &Url) -> Result<Vec<u8>, WorkerError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.get(index).cloned().unwrap_or_else(|| self.fallback.clone());

        let in_flight = InFlight::new(&self.abandoned);
        let result = match step {
            Step::Respond { after, result } => {
                tokio::time::sleep(after).await;
                result
            }
            Step::Hang => std::future::pending::<Result<Vec<u8>, WorkerError>>().await,
            Step::Panic => panic!("scripted upstream panic"),
        };
        in_flight.disarm();
        self.completed.fetch_add(1, Ordering::SeqCst);
        result
    }
}

/// Helper functions to reduce test boilerplate
pub struct TestHelpers;

impl TestHelpers {
    /// Orchestrator over a scripted source that the test keeps a handle to
    pub fn scripted(steps: Vec<Step>) -> (Orchestrator<ScriptedSource>, Arc<ScriptedSource>) {
        let source = Arc::new(ScriptedSource::new(steps));
        let orchestrator =
            Orchestrator::with_shared_source(Arc::clone(&source), TestFixtures::upstream_config());
        (orchestrator, source)
    }

    /// Run one request with a caller token that is never cancelled
    pub async fn run<S>(
        orchestrator: &Orchestrator<S>,
        workers: u32,
        length: u32,
    ) -> OrchestratorResult<AggregateReport>
    where
        S: RandomnessSource + 'static,
    {
        orchestrator
            .run(
                RequestId::new(),
                RequestSpec::new(workers, length),
                CancellationToken::new(),
            )
            .await
    }

    /// Check the report invariants that hold for every successful request
    pub fn assert_report_consistent(report: &AggregateReport, workers: usize) {
        assert_eq!(report.per_worker_results.len(), workers);

        let expected_len: usize = report.per_worker_results.iter().map(|r| r.data.len()).sum();
        assert_eq!(report.combined.data.len(), expected_len);

        let concatenated: Vec<i64> = report
            .per_worker_results
            .iter()
            .flat_map(|r| r.data.iter().copied())
            .collect();
        assert_eq!(report.combined.data, concatenated);
        assert_eq!(
            report.combined.standard_deviation,
            orchestrator::standard_deviation(&concatenated)
        );
    }
}
