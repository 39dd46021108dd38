//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for one incoming `/random/mean` request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Component identifier attached to every log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentId {
    /// HTTP surface
    WebServer,
    /// Fan-out/fan-in coordinator for one request
    Orchestrator,
    /// One upstream call, numbered by launch order
    Worker(u32),
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::WebServer => write!(f, "webserver"),
            ComponentId::Orchestrator => write!(f, "orchestrator"),
            ComponentId::Worker(n) => write!(f, "worker_{n}"),
        }
    }
}

/// Validated shape of one fan-out request.
///
/// Built by the HTTP layer after query validation; consumed once by the
/// orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Number of concurrent upstream calls
    pub worker_count: u32,
    /// Integers requested from the upstream per call
    pub quantity_per_worker: u32,
}

impl RequestSpec {
    pub fn new(worker_count: u32, quantity_per_worker: u32) -> Self {
        Self {
            worker_count,
            quantity_per_worker,
        }
    }
}

/// Statistics over one sequence of integers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    pub standard_deviation: f64,
    pub data: Vec<i64>,
}

impl SampleResult {
    pub fn new(standard_deviation: f64, data: Vec<i64>) -> Self {
        Self {
            standard_deviation,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Terminal artifact of a successful fan-out.
///
/// `combined.data` is the concatenation of every per-worker `data` in
/// completion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub per_worker_results: Vec<SampleResult>,
    pub combined: SampleResult,
}

impl AggregateReport {
    /// Number of integers collected across all workers
    pub fn total_len(&self) -> usize {
        self.combined.len()
    }
}
